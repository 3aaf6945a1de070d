/// console and file logging through simplelog
/// # Examples
/// ```
/// use EquiSim::Utils::logger::init_logger;
/// use log::LevelFilter;
/// init_logger(LevelFilter::Warn, None);
/// // a second call is ignored
/// init_logger(LevelFilter::Debug, None);
/// ```
pub mod logger;
