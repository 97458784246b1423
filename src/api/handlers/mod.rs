pub mod distributions;
pub mod system;
pub mod zones;
