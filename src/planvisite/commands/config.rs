use crate::commands::{CmdMessage, CmdResult, PlanPaths};
use crate::config::PlanConfig;
use crate::error::Result;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run(paths: &PlanPaths, action: ConfigAction) -> Result<CmdResult> {
    let dir = &paths.data_dir;
    match action {
        ConfigAction::ShowAll => {
            let config = PlanConfig::load(dir)?;
            Ok(CmdResult::default().with_config(config))
        }
        ConfigAction::ShowKey(key) => {
            let config = PlanConfig::load(dir)?;
            let mut result = CmdResult::default();
            match config.get(&key) {
                Some(val) => result.add_message(CmdMessage::info(val)),
                None => {
                    result.add_message(CmdMessage::error(format!("Unknown config key: {}", key)))
                }
            }
            Ok(result)
        }
        ConfigAction::Set(key, value) => {
            let mut config = PlanConfig::load(dir)?;
            if let Err(e) = config.set(&key, &value) {
                let mut res = CmdResult::default();
                res.add_message(CmdMessage::error(e.to_string()));
                return Ok(res);
            }
            config.save(dir)?;
            let display_val = config.get(&key).unwrap_or(value);
            let mut result = CmdResult::default().with_config(config);
            result.add_message(CmdMessage::success(format!(
                "{} set to {}",
                key, display_val
            )));
            Ok(result)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use tempfile::tempdir;

    #[test]
    fn set_then_show_key() {
        let dir = tempdir().unwrap();
        let paths = PlanPaths {
            data_dir: dir.path().to_path_buf(),
        };

        let set = run(
            &paths,
            ConfigAction::Set("export-format".into(), "simple".into()),
        )
        .unwrap();
        assert_eq!(set.messages[0].content, "export-format set to csv-simple");

        let shown = run(&paths, ConfigAction::ShowKey("export-format".into())).unwrap();
        assert_eq!(shown.messages[0].content, "csv-simple");
    }

    #[test]
    fn invalid_value_is_reported_not_saved() {
        let dir = tempdir().unwrap();
        let paths = PlanPaths {
            data_dir: dir.path().to_path_buf(),
        };
        let result = run(
            &paths,
            ConfigAction::Set("import-delimiter".into(), "abc".into()),
        )
        .unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Error);
        assert!(!dir.path().join("config.json").exists());
    }

    #[test]
    fn show_all_returns_defaults() {
        let dir = tempdir().unwrap();
        let paths = PlanPaths {
            data_dir: dir.path().to_path_buf(),
        };
        let result = run(&paths, ConfigAction::ShowAll).unwrap();
        assert_eq!(result.config, Some(PlanConfig::default()));
    }
}
