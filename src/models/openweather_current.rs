use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct Coord {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Deserialize, Debug, Default)]
pub struct Sys {
    pub country: Option<String>,
}

/// The parts of a current conditions document needed to resolve a place name
#[derive(Deserialize, Debug)]
pub struct CurrentWeather {
    pub coord: Coord,
    pub name: Option<String>,
    #[serde(default)]
    pub sys: Sys,
}
