pub mod directional_light;
pub mod gate;
pub mod traffic_light_controller;
