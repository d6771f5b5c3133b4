pub mod stop_signal;
pub mod traffic_controller;
