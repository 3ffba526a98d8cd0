use jiff::civil::{Date, Weekday};

/// Column header metadata for one night of the room map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateHeader {
    pub date: Date,
    pub weekday: &'static str,
    pub day_of_month: i8,
    pub is_weekend: bool,
    pub is_today: bool,
}

/// Short Portuguese weekday label.
pub fn weekday_label(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Monday => "Seg",
        Weekday::Tuesday => "Ter",
        Weekday::Wednesday => "Qua",
        Weekday::Thursday => "Qui",
        Weekday::Friday => "Sex",
        Weekday::Saturday => "Sáb",
        Weekday::Sunday => "Dom",
    }
}

/// One header per date from `start` through `end`, inclusive.
pub fn date_headers(start: Date, end: Date, today: Date) -> Vec<DateHeader> {
    start
        .series(jiff::Span::new().days(1))
        .take_while(|date| *date <= end)
        .map(|date| {
            let weekday = date.weekday();
            DateHeader {
                date,
                weekday: weekday_label(weekday),
                day_of_month: date.day(),
                is_weekend: matches!(
                    weekday,
                    Weekday::Saturday | Weekday::Sunday
                ),
                is_today: date == today,
            }
        })
        .collect()
}

/// Format a date the way the guest-facing screens show it, e.g. 01/06/2024.
pub fn format_date(date: Date) -> String {
    date.strftime("%d/%m/%Y").to_string()
}
