//! Interactive run controls typed on stdin

use toolbench_core::run::{RunHandle, RunId};

/// A parsed control command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlCommand {
    Pause(RunId),
    Resume(RunId),
    /// Stop one run, or every run when no run is named
    Stop(Option<RunId>),
    Help,
}

impl ControlCommand {
    pub const USAGE: &'static str =
        "Commands: pause <n>, resume <n>, stop <n>, stop (all runs), help";

    /// Parse one input line such as `pause 2`
    pub fn parse(line: &str) -> Result<Self, String> {
        let mut words = line.split_whitespace();
        let verb = words
            .next()
            .map(str::to_lowercase)
            .ok_or_else(|| "Empty command".to_string())?;
        let run = words.next().map(parse_run).transpose()?;
        if words.next().is_some() {
            return Err(format!("Unexpected arguments in '{}'", line.trim()));
        }

        match (verb.as_str(), run) {
            ("pause", Some(run)) => Ok(Self::Pause(run)),
            ("resume", Some(run)) => Ok(Self::Resume(run)),
            ("stop", run) => Ok(Self::Stop(run)),
            ("help" | "?", None) => Ok(Self::Help),
            ("pause" | "resume", None) => Err(format!("'{}' needs a model number (1 or 2)", verb)),
            _ => Err(format!("Unknown command '{}'", line.trim())),
        }
    }

    /// Apply the command to the matching handles, returning a status line
    pub fn apply(&self, handles: &[RunHandle]) -> String {
        let find = |run: RunId| handles.iter().find(|handle| handle.id() == run);

        match *self {
            Self::Pause(run) => match find(run) {
                Some(handle) if handle.pause() => format!("{} paused", run),
                Some(handle) => format!("{} is {}, nothing to pause", run, handle.state()),
                None => format!("{} is not part of this benchmark", run),
            },
            Self::Resume(run) => match find(run) {
                Some(handle) if handle.resume() => format!("{} resumed", run),
                Some(handle) => format!("{} is {}, nothing to resume", run, handle.state()),
                None => format!("{} is not part of this benchmark", run),
            },
            Self::Stop(Some(run)) => match find(run) {
                Some(handle) if handle.stop() => format!("{} stopping", run),
                Some(handle) => format!("{} is already {}", run, handle.state()),
                None => format!("{} is not part of this benchmark", run),
            },
            Self::Stop(None) => {
                let stopped = handles.iter().filter(|handle| handle.stop()).count();
                format!("Stopping {} run(s)", stopped)
            }
            Self::Help => Self::USAGE.to_string(),
        }
    }
}

fn parse_run(word: &str) -> Result<RunId, String> {
    word.parse::<usize>()
        .ok()
        .and_then(RunId::from_number)
        .ok_or_else(|| format!("Unknown model number '{}' (expected 1 or 2)", word))
}

#[cfg(test)]
mod tests {
    use super::*;
    use toolbench_core::run::RunState;

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            ControlCommand::parse("pause 1"),
            Ok(ControlCommand::Pause(RunId::Primary))
        );
        assert_eq!(
            ControlCommand::parse("  RESUME 2 "),
            Ok(ControlCommand::Resume(RunId::Secondary))
        );
        assert_eq!(ControlCommand::parse("stop"), Ok(ControlCommand::Stop(None)));
        assert_eq!(
            ControlCommand::parse("stop 2"),
            Ok(ControlCommand::Stop(Some(RunId::Secondary)))
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(ControlCommand::parse("").is_err());
        assert!(ControlCommand::parse("pause").is_err());
        assert!(ControlCommand::parse("pause 3").is_err());
        assert!(ControlCommand::parse("stop 1 2").is_err());
        assert!(ControlCommand::parse("restart 1").is_err());
    }

    #[test]
    fn test_stop_all() {
        let handles = vec![RunHandle::new(RunId::Primary), RunHandle::new(RunId::Secondary)];
        let message = ControlCommand::Stop(None).apply(&handles);
        assert_eq!(message, "Stopping 2 run(s)");
        assert!(handles.iter().all(|h| h.state() == RunState::Stopped));
    }

    #[test]
    fn test_unknown_run() {
        let handles = vec![RunHandle::new(RunId::Primary)];
        let message = ControlCommand::Pause(RunId::Secondary).apply(&handles);
        assert_eq!(message, "Model 2 is not part of this benchmark");
    }
}
