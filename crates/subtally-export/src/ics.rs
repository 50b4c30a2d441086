//! ICS calendar feed. Each subscription becomes a recurring all-day event
//! anchored at its raw billing date; active trials instead emit a single
//! reminder one day before the trial ends.

use chrono::{Duration, NaiveDate};

use subtally_domain::{Cycle, Subscription};

const CRLF: &str = "\r\n";

/// Renders a VCALENDAR document covering every subscription.
pub fn calendar_feed(subscriptions: &[Subscription]) -> String {
    let mut lines: Vec<String> = vec![
        "BEGIN:VCALENDAR".into(),
        "VERSION:2.0".into(),
        "PRODID:-//Subtally//Renewal Feed//EN".into(),
    ];
    for sub in subscriptions {
        lines.extend(event_lines(sub));
    }
    lines.push("END:VCALENDAR".into());
    let mut output = lines.join(CRLF);
    output.push_str(CRLF);
    output
}

fn event_lines(sub: &Subscription) -> Vec<String> {
    if sub.is_trial {
        if let Some(end) = sub.trial_end_date {
            return trial_reminder_lines(sub, end);
        }
    }
    vec![
        "BEGIN:VEVENT".into(),
        format!("UID:{}@subtally", sub.id),
        format!("DTSTART;VALUE=DATE:{}", compact_date(sub.anchor_date)),
        format!("RRULE:{}", rrule(sub.cycle)),
        format!("SUMMARY:{}", escape_text(&format!("{} renewal", sub.name))),
        "END:VEVENT".into(),
    ]
}

fn trial_reminder_lines(sub: &Subscription, trial_end: NaiveDate) -> Vec<String> {
    let reminder = trial_end - Duration::days(1);
    vec![
        "BEGIN:VEVENT".into(),
        format!("UID:{}-trial@subtally", sub.id),
        format!("DTSTART;VALUE=DATE:{}", compact_date(reminder)),
        format!(
            "SUMMARY:{}",
            escape_text(&format!("{} trial ends tomorrow", sub.name))
        ),
        "END:VEVENT".into(),
    ]
}

fn rrule(cycle: Cycle) -> &'static str {
    match cycle {
        Cycle::Weekly => "FREQ=WEEKLY",
        Cycle::Biweekly => "FREQ=WEEKLY;INTERVAL=2",
        Cycle::Monthly => "FREQ=MONTHLY",
        Cycle::Quarterly => "FREQ=MONTHLY;INTERVAL=3",
        Cycle::Yearly => "FREQ=YEARLY",
    }
}

fn compact_date(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

fn escape_text(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace(';', "\\;")
        .replace(',', "\\,")
        .replace('\n', "\\n")
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use subtally_domain::{Cycle, Subscription};

    use super::calendar_feed;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn feed_mirrors_cycles_as_rrules() {
        let subs = vec![
            Subscription::new("Gym", date(2026, 1, 10), Cycle::Biweekly, 15.0),
            Subscription::new("Cloud", date(2026, 1, 5), Cycle::Quarterly, 30.0),
        ];
        let feed = calendar_feed(&subs);

        assert!(feed.starts_with("BEGIN:VCALENDAR\r\n"));
        assert!(feed.contains("DTSTART;VALUE=DATE:20260110"));
        assert!(feed.contains("RRULE:FREQ=WEEKLY;INTERVAL=2"));
        assert!(feed.contains("RRULE:FREQ=MONTHLY;INTERVAL=3"));
        assert!(feed.ends_with("END:VCALENDAR\r\n"));
    }

    #[test]
    fn trial_items_emit_single_reminder_before_end() {
        let subs = vec![
            Subscription::new("Stream+", date(2026, 1, 1), Cycle::Monthly, 0.99)
                .with_trial(11.99, date(2026, 2, 1)),
        ];
        let feed = calendar_feed(&subs);

        assert!(feed.contains("DTSTART;VALUE=DATE:20260131"));
        assert!(feed.contains("trial ends tomorrow"));
        assert!(!feed.contains("RRULE"));
    }

    #[test]
    fn commas_in_names_are_escaped() {
        let subs = vec![Subscription::new(
            "News, Weekly Edition",
            date(2026, 1, 1),
            Cycle::Weekly,
            4.0,
        )];
        let feed = calendar_feed(&subs);
        assert!(feed.contains("SUMMARY:News\\, Weekly Edition renewal"));
    }
}
