use log::debug;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::models::command::ParsedCommand;
use crate::models::schedule::Schedule;
use crate::service::resolver::cancel_target;

/// Clock time said with am/pm (`3pm`, `3:30 pm`, `3p`).
const MERIDIEM_TIME: &str = r"\d{1,2}(?::\d{2})?\s*[ap]m?";
/// 24-hour clock time (`15:30`).
const MILITARY_TIME: &str = r"\d{1,2}:\d{2}";
/// Whole hour said as `7 o'clock`, optionally followed by am/pm.
const OCLOCK_TIME: &str = r"\d{1,2}\s*o['’]?clock(?:\s*[ap]m)?";

const CANCEL_VERB: &str = r"\b(?:cancel|delete|remove)";
const RESCHEDULE_VERB: &str = r"\b(?:reschedule|move|change)";
const SCHEDULE_VERB: &str = r"\b(?:schedule|add|book|create)";
const AT: &str = r"(?:at|for|on)";

fn any_time() -> String {
    format!("(?:{MERIDIEM_TIME}|{MILITARY_TIME}|{OCLOCK_TIME})")
}

fn compile(pattern: String) -> Regex {
    Regex::new(&format!("(?i){pattern}")).expect("valid command pattern")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    /// Group 1 is the event, group 2 the time.
    EventThenTime,
    /// Group 1 is the time, group 2 the event.
    TimeThenEvent,
    /// Group 1 is an event query or a time.
    Target,
}

struct CommandPattern {
    name: &'static str,
    regex: Regex,
    shape: Shape,
}

impl CommandPattern {
    fn new(name: &'static str, pattern: String, shape: Shape) -> Self {
        Self {
            name,
            regex: compile(pattern),
            shape,
        }
    }

    /// Returns `(event_text, time_text)`, or `(target, "")` for [`Shape::Target`].
    /// Extractions with a blank event are treated as no match.
    fn extract(&self, text: &str) -> Option<(String, String)> {
        let caps = self.regex.captures(text)?;
        let (event, time) = match self.shape {
            Shape::EventThenTime => (group(&caps, 1), group(&caps, 2)),
            Shape::TimeThenEvent => (group(&caps, 2), group(&caps, 1)),
            Shape::Target => (group(&caps, 1), String::new()),
        };
        if event.is_empty() {
            return None;
        }
        Some((event, time))
    }
}

fn group(caps: &Captures<'_>, index: usize) -> String {
    caps.get(index)
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

static CANCEL_PATTERNS: Lazy<Vec<CommandPattern>> = Lazy::new(|| {
    let time = any_time();
    vec![
        CommandPattern::new(
            "cancel_event_at_time",
            format!(r"{CANCEL_VERB}\s+(.+?)\s+(?:at|from)\s+({time})"),
            Shape::EventThenTime,
        ),
        CommandPattern::new("cancel_target", format!(r"{CANCEL_VERB}\s+(.+)"), Shape::Target),
        CommandPattern::new(
            "cancel_at_time",
            format!(r"{CANCEL_VERB}\s+(?:the\s+)?(?:event\s+)?(?:at\s+)?({time})"),
            Shape::Target,
        ),
    ]
});

struct ReschedulePattern {
    name: &'static str,
    regex: Regex,
    has_from_time: bool,
}

static RESCHEDULE_PATTERNS: Lazy<Vec<ReschedulePattern>> = Lazy::new(|| {
    let time = any_time();
    vec![
        ReschedulePattern {
            name: "reschedule_from_to",
            regex: compile(format!(
                r"{RESCHEDULE_VERB}\s+(.+?)\s+(?:(?:from|at)\s+)?({time})\s+(?:to|at)\s+({time})"
            )),
            has_from_time: true,
        },
        ReschedulePattern {
            name: "reschedule_to",
            regex: compile(format!(r"{RESCHEDULE_VERB}\s+(.+?)\s+(?:to|at)\s+({time})")),
            has_from_time: false,
        },
    ]
});

static SCHEDULE_PATTERNS: Lazy<Vec<CommandPattern>> = Lazy::new(|| {
    vec![
        CommandPattern::new(
            "verb_event_at_time",
            format!(r"{SCHEDULE_VERB}\s+(.+?)\s+{AT}\s+({MERIDIEM_TIME})"),
            Shape::EventThenTime,
        ),
        CommandPattern::new(
            "event_at_time",
            format!(r"(.+?)\s+{AT}\s+({MERIDIEM_TIME})"),
            Shape::EventThenTime,
        ),
        CommandPattern::new(
            "time_event",
            format!(r"({MERIDIEM_TIME})\s+(.+)"),
            Shape::TimeThenEvent,
        ),
        CommandPattern::new(
            "event_time",
            format!(r"(.+?)\s+({MERIDIEM_TIME})"),
            Shape::EventThenTime,
        ),
        CommandPattern::new(
            "verb_event_at_military",
            format!(r"{SCHEDULE_VERB}\s+(.+?)\s+{AT}\s+({MILITARY_TIME})"),
            Shape::EventThenTime,
        ),
        CommandPattern::new(
            "event_at_military",
            format!(r"(.+?)\s+{AT}\s+({MILITARY_TIME})"),
            Shape::EventThenTime,
        ),
        CommandPattern::new(
            "verb_event_at_oclock",
            format!(r"{SCHEDULE_VERB}\s+(.+?)\s+{AT}\s+({OCLOCK_TIME})"),
            Shape::EventThenTime,
        ),
        CommandPattern::new(
            "event_at_oclock",
            format!(r"(.+?)\s+{AT}\s+({OCLOCK_TIME})"),
            Shape::EventThenTime,
        ),
        CommandPattern::new(
            "military_event",
            format!(r"({MILITARY_TIME})\s+(.+)"),
            Shape::TimeThenEvent,
        ),
    ]
});

/// Turns raw command text into a [`ParsedCommand`].
pub trait CommandRouter: Send + Sync {
    fn route(&self, text: &str, schedule: &Schedule) -> ParsedCommand;
}

/// Ordered pattern tables: cancel, then reschedule, then schedule. The
/// first pattern that matches wins.
pub struct PatternRouter;

impl CommandRouter for PatternRouter {
    fn route(&self, text: &str, schedule: &Schedule) -> ParsedCommand {
        route_command(text, schedule)
    }
}

pub fn route_command(text: &str, schedule: &Schedule) -> ParsedCommand {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return ParsedCommand::Unrecognized {
            original_text: trimmed.to_string(),
        };
    }

    if let Some(command) = route_cancel(trimmed, schedule) {
        return command;
    }
    if let Some(command) = route_reschedule(trimmed) {
        return command;
    }
    if let Some(command) = route_schedule(trimmed) {
        return command;
    }

    debug!("event=command_unrecognized module=routing");
    ParsedCommand::Unrecognized {
        original_text: trimmed.to_string(),
    }
}

/// Cancel variants are checked against the schedule; a variant whose target
/// does not resolve falls through to the next one. Once any cancel pattern
/// matched, the command stays a cancel even if nothing resolves.
fn route_cancel(text: &str, schedule: &Schedule) -> Option<ParsedCommand> {
    let mut first_match: Option<ParsedCommand> = None;
    for pattern in CANCEL_PATTERNS.iter() {
        let Some((event, time)) = pattern.extract(text) else {
            continue;
        };
        let (target, event_text) = match pattern.shape {
            Shape::EventThenTime => (time, Some(event)),
            _ => (event, None),
        };
        let resolves = cancel_target(&target, event_text.as_deref(), schedule).is_some();
        let command = ParsedCommand::Cancel { target, event_text };
        if resolves {
            debug!("event=command_routed module=routing pattern={}", pattern.name);
            return Some(command);
        }
        if first_match.is_none() {
            first_match = Some(command);
        }
    }
    first_match
}

fn route_reschedule(text: &str) -> Option<ParsedCommand> {
    RESCHEDULE_PATTERNS.iter().find_map(|pattern| {
        let caps = pattern.regex.captures(text)?;
        let event_query = group(&caps, 1);
        if event_query.is_empty() {
            return None;
        }
        let (from_time_text, time_text) = if pattern.has_from_time {
            (Some(group(&caps, 2)), group(&caps, 3))
        } else {
            (None, group(&caps, 2))
        };
        debug!("event=command_routed module=routing pattern={}", pattern.name);
        Some(ParsedCommand::Reschedule {
            event_query,
            from_time_text,
            time_text,
        })
    })
}

fn route_schedule(text: &str) -> Option<ParsedCommand> {
    SCHEDULE_PATTERNS.iter().find_map(|pattern| {
        let (event_text, time_text) = pattern.extract(text)?;
        debug!("event=command_routed module=routing pattern={}", pattern.name);
        Some(ParsedCommand::Schedule {
            event_text,
            time_text,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::slot::Slot;

    fn schedule_of(entries: &[(&str, &str)]) -> Schedule {
        entries
            .iter()
            .map(|(slot, label)| (Slot::from_canonical(slot).unwrap(), label.to_string()))
            .collect()
    }

    fn scheduled(event: &str, time: &str) -> ParsedCommand {
        ParsedCommand::Schedule {
            event_text: event.to_string(),
            time_text: time.to_string(),
        }
    }

    #[test]
    fn schedule_phrasings_extract_event_and_time() {
        let empty = Schedule::new();
        let cases = [
            ("schedule meeting at 3pm", scheduled("meeting", "3pm")),
            ("add lunch at 12:30pm", scheduled("lunch", "12:30pm")),
            ("meeting at 2pm", scheduled("meeting", "2pm")),
            ("3pm team call", scheduled("team call", "3pm")),
            ("dinner at 7 o'clock", scheduled("dinner", "7 o'clock")),
            ("15:30 workout", scheduled("workout", "15:30")),
            ("book appointment at 10am", scheduled("appointment", "10am")),
            ("meeting for 4pm", scheduled("meeting", "4pm")),
            ("9pm movie", scheduled("movie", "9pm")),
            ("workout at 6:30pm", scheduled("workout", "6:30pm")),
            ("gym 7 am", scheduled("gym", "7 am")),
            ("create standup at 09:30", scheduled("standup", "09:30")),
        ];
        for (text, expected) in cases {
            assert_eq!(route_command(text, &empty), expected, "{text}");
        }
    }

    #[test]
    fn schedule_keeps_original_case_of_event() {
        let parsed = route_command("Schedule Team Sync at 3PM", &Schedule::new());
        assert_eq!(parsed, scheduled("Team Sync", "3PM"));
    }

    #[test]
    fn verb_inside_a_word_is_not_a_verb() {
        let parsed = route_command("notebook club at 3pm", &Schedule::new());
        assert_eq!(parsed, scheduled("notebook club", "3pm"));
    }

    #[test]
    fn reschedule_phrasings() {
        let empty = Schedule::new();
        assert_eq!(
            route_command("reschedule meeting to 4pm", &empty),
            ParsedCommand::Reschedule {
                event_query: "meeting".to_string(),
                from_time_text: None,
                time_text: "4pm".to_string(),
            }
        );
        assert_eq!(
            route_command("change meeting at 3pm to 5pm", &empty),
            ParsedCommand::Reschedule {
                event_query: "meeting".to_string(),
                from_time_text: Some("3pm".to_string()),
                time_text: "5pm".to_string(),
            }
        );
        assert_eq!(
            route_command("move team lunch from 12pm to 1:30pm", &empty),
            ParsedCommand::Reschedule {
                event_query: "team lunch".to_string(),
                from_time_text: Some("12pm".to_string()),
                time_text: "1:30pm".to_string(),
            }
        );
    }

    #[test]
    fn cancel_with_event_and_time_requires_matching_label() {
        let schedule = schedule_of(&[("15:00", "Meeting with Bob")]);
        assert_eq!(
            route_command("cancel meeting at 3pm", &schedule),
            ParsedCommand::Cancel {
                target: "3pm".to_string(),
                event_text: Some("meeting".to_string()),
            }
        );
    }

    #[test]
    fn cancel_falls_through_to_name_search() {
        let schedule = schedule_of(&[("12:30", "lunch")]);
        assert_eq!(
            route_command("delete lunch", &schedule),
            ParsedCommand::Cancel {
                target: "lunch".to_string(),
                event_text: None,
            }
        );
    }

    #[test]
    fn cancel_falls_through_to_bare_time() {
        let schedule = schedule_of(&[("14:00", "meeting")]);
        assert_eq!(
            route_command("remove 2pm meeting", &schedule),
            ParsedCommand::Cancel {
                target: "2pm".to_string(),
                event_text: None,
            }
        );
        let schedule = schedule_of(&[("16:00", "dentist")]);
        assert_eq!(
            route_command("cancel the event at 4pm", &schedule),
            ParsedCommand::Cancel {
                target: "4pm".to_string(),
                event_text: None,
            }
        );
    }

    #[test]
    fn unresolved_cancel_stays_a_cancel() {
        let parsed = route_command("cancel meeting at 3pm", &Schedule::new());
        assert_eq!(
            parsed,
            ParsedCommand::Cancel {
                target: "3pm".to_string(),
                event_text: Some("meeting".to_string()),
            }
        );
    }

    #[test]
    fn unrecognized_text() {
        for text in ["xyz abc 99:99", "hello there", "", "   "] {
            assert!(
                matches!(route_command(text, &Schedule::new()), ParsedCommand::Unrecognized { .. }),
                "{text}"
            );
        }
    }
}
