pub mod openweather_current;
pub mod openweather_onecall;
pub mod openweather_forecast;
pub mod forecast10;
