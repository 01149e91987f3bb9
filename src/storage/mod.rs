pub mod influx;

pub use self::influx::InfluxWriter;
