use log::{debug, info};

use failure::{Error, Fail};

use metrum_core::{
  config::Config,
  tempo_map::TempoMap,
  time::TicksTime,
  LengthConverter, RepresentationKind, TimeConverter,
};

const METRUM_CONFIG: &str = "METRUM_CONFIG";
const DEFAULT_METRUM_CONFIG: &str = "timeline.toml";

const METRUM_LOG_CONFIG: &str = "METRUM_LOG_CONFIG";
const DEFAULT_METRUM_LOG_CONFIG: &str = "log4rs.yaml";

#[derive(Debug, Fail)]
enum MainError {
  #[fail(display = "Failed to init logging: {}", cause)]
  LoggingInit { cause: String },

  #[fail(display = "Invalid tick '{}': expected a non-negative integer", arg)]
  InvalidTick { arg: String },
}

fn main() -> Result<(), Error> {
  init_logging()?;

  let config = init_config()?;

  let tempo_map = init_tempo_map(&config)?;

  let ticks = parse_ticks(std::env::args().skip(1))?;

  print_conversions(&tempo_map, &ticks)?;

  Ok(())
}

fn init_logging() -> Result<(), Error> {
  let log_config_path = std::env::var(METRUM_LOG_CONFIG)
    .unwrap_or_else(|_| DEFAULT_METRUM_LOG_CONFIG.to_string());

  log4rs::init_file(log_config_path.as_str(), Default::default()).map_err(|err| {
    MainError::LoggingInit {
      cause: err.to_string(),
    }
  })?;

  Ok(())
}

fn init_config() -> Result<Config, Error> {
  let config_path =
    std::env::var(METRUM_CONFIG).unwrap_or_else(|_| DEFAULT_METRUM_CONFIG.to_string());

  info!("Loading timeline configuration from {} ...", config_path);
  let config = Config::from_file(config_path.as_str())?;
  debug!("{:#?}", config);

  Ok(config)
}

fn init_tempo_map(config: &Config) -> Result<TempoMap, Error> {
  info!("Building the tempo map ...");

  let tempo_map = config.timeline.tempo_map()?;

  debug!("Tempo changes:");
  for change in tempo_map.tempo_changes() {
    debug!("=> {} at {:.3} BPM", change.tick, change.tempo.bpm());
  }
  debug!("Signature changes:");
  for change in tempo_map.signature_changes() {
    debug!("=> {} at {}", change.tick, change.signature);
  }

  Ok(tempo_map)
}

fn parse_ticks<I>(args: I) -> Result<Vec<TicksTime>, Error>
where
  I: Iterator<Item = String>,
{
  let mut ticks = Vec::new();
  for arg in args {
    let value = arg
      .parse::<u64>()
      .map_err(|_| MainError::InvalidTick { arg: arg.clone() })?;
    ticks.push(TicksTime::new(value));
  }
  Ok(ticks)
}

fn print_conversions(tempo_map: &TempoMap, ticks: &[TicksTime]) -> Result<(), Error> {
  let time_converter = TimeConverter::default();
  let length_converter = LengthConverter::default();

  let mut previous = TicksTime::zero();
  for tick in ticks.iter() {
    let mut columns = vec![format!("{:>10}", tick.get_ticks())];
    for kind in RepresentationKind::ALL
      .iter()
      .filter(|kind| **kind != RepresentationKind::Ticks)
    {
      let time = time_converter.to_representation(*tick, *kind, tempo_map)?;
      columns.push(format!("{:>18}", time.to_string()));
    }
    let (start, length) = if *tick >= previous {
      (previous, *tick - previous)
    } else {
      (*tick, previous - *tick)
    };
    let delta =
      length_converter.to_representation(length, start, RepresentationKind::Metric, tempo_map)?;
    columns.push(format!("(+{})", delta));
    println!("{}", columns.join(" "));
    previous = *tick;
  }

  Ok(())
}
