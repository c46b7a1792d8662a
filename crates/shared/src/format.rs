/// Renders a duration in minutes the way recipe cards show it.
pub fn format_time(minutes: u32) -> String {
    if minutes < 60 {
        return format!("{minutes} min");
    }

    let hours = minutes / 60;
    match minutes % 60 {
        0 => format!("{hours} hr"),
        rest => format!("{hours} hr {rest} min"),
    }
}

pub fn pluralize(count: usize, singular: &str) -> String {
    if count == 1 {
        singular.to_owned()
    } else {
        format!("{singular}s")
    }
}

pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_owned();
    }

    let mut out: String = text.chars().take(max_chars).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_labels() {
        assert_eq!(format_time(45), "45 min");
        assert_eq!(format_time(60), "1 hr");
        assert_eq!(format_time(90), "1 hr 30 min");
        assert_eq!(format_time(0), "0 min");
    }

    #[test]
    fn plural_and_truncate() {
        assert_eq!(pluralize(1, "review"), "review");
        assert_eq!(pluralize(3, "review"), "reviews");
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("a longer description", 8), "a longer...");
    }
}
