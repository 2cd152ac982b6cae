//! Reading and writing datasets and configuration as JSON files.

use std::fs::File;
use std::io;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{from_reader, to_writer_pretty};
use tracing::{debug, info};

use crate::eligibility::SuspensionConfig;
use crate::store::Dataset;

/// Reads a JSON-encoded type from a given file `path`.
pub fn read_json<D: DeserializeOwned>(path: impl AsRef<Path>) -> Result<D, io::Error> {
    let file = File::open(path)?;
    Ok(from_reader(BufReader::new(file))?)
}

/// Writes `value` to a given file `path` as pretty-printed JSON, replacing any existing file.
pub fn write_json<S: Serialize>(path: impl AsRef<Path>, value: &S) -> Result<(), io::Error> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    to_writer_pretty(&mut writer, value)?;
    writer.flush()
}

pub trait FromJsonFile: Sized {
    fn from_json_file(path: impl AsRef<Path>) -> Result<Self, io::Error>;
}

impl<D: DeserializeOwned> FromJsonFile for D {
    fn from_json_file(path: impl AsRef<Path>) -> Result<D, io::Error> {
        read_json(path)
    }
}

pub trait ToJsonFile {
    fn to_json_file(&self, path: impl AsRef<Path>) -> Result<(), io::Error>;
}

impl<S: Serialize> ToJsonFile for S {
    fn to_json_file(&self, path: impl AsRef<Path>) -> Result<(), io::Error> {
        write_json(path, self)
    }
}

pub fn load_dataset(path: impl AsRef<Path>) -> Result<Dataset, io::Error> {
    let path = path.as_ref();
    let dataset = Dataset::from_json_file(path)?;
    info!(
        "read {} matches, {} player seasons and {} team seasons from {}",
        dataset.matches.len(),
        dataset.players.len(),
        dataset.teams.len(),
        path.display()
    );
    Ok(dataset)
}

pub fn load_suspensions(path: impl AsRef<Path>) -> Result<SuspensionConfig, io::Error> {
    let path = path.as_ref();
    let config = SuspensionConfig::from_json_file(path)?;
    debug!("read suspensions for {} season(s) from {}", config.suspensions.len(), path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::path::PathBuf;

    use super::*;
    use crate::testing::{assert_defined_near, competed, match_won_by_runs, suspended};

    fn temp_path(name: &str) -> PathBuf {
        env::temp_dir().join(format!("crease-{}-{name}", std::process::id()))
    }

    #[test]
    fn dataset_survives_a_file() {
        let dataset = Dataset {
            matches: vec![match_won_by_runs(1, 2016, "Gujarat Lions", "Mumbai Indians", 3)],
            players: vec![],
            teams: vec![
                competed("Gujarat Lions", 2016, 14, 9, -0.374),
                suspended("Chennai Super Kings", 2016),
            ],
        };
        let path = temp_path("dataset.json");
        dataset.to_json_file(&path).unwrap();
        let loaded = load_dataset(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(dataset.matches, loaded.matches);
        assert_eq!(2, loaded.teams.len());
        assert!(loaded.teams[1].suspended);
        assert_defined_near(-0.374, Some(loaded.teams[0].net_run_rate));
    }

    #[test]
    fn suspensions_from_file() {
        let path = temp_path("suspensions.json");
        std::fs::write(&path, r#"{ "suspensions": { "2012": ["Deccan Chargers"] } }"#).unwrap();
        let config = load_suspensions(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert!(config.is_suspended(2012, "Deccan Chargers"));
        assert!(!config.is_suspended(2016, "Chennai Super Kings"));
    }

    #[test]
    fn missing_file() {
        assert_eq!(
            io::ErrorKind::NotFound,
            load_dataset(temp_path("absent.json")).unwrap_err().kind()
        );
    }
}
