// Calendar Widget Library
// Event store, date grids and time-grid layout for month/week calendar views

pub mod models;
pub mod services;
pub mod utils;
pub mod widget;
