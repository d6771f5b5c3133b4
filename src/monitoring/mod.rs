pub mod traffic_monitoring_system;
