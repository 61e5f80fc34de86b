/// Lucky number page: form, weekly result, analysis and past weeks
use chrono::NaiveDateTime;
use iced::widget::{button, column, container, pick_list, row, text, text_input, Column, Row};
use iced::{Border, Color, Element, Length};

use crate::lucky::analysis::{NumberAnalysis, NumberBand};
use crate::lucky::dream::read_dream;
use crate::lucky::history::HistoryRecord;
use crate::lucky::seed::{next_refresh, week_key};
use crate::lucky::{Gender, Generated, GenerationInput, LuckyGenerator};
use crate::Message;

/// Raw text of the form fields
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LuckyForm {
    pub birthdate: String,
    pub birthtime: String,
    pub name: String,
    pub gender: Option<Gender>,
    pub dream: String,
}

impl LuckyForm {
    pub fn to_input(&self) -> GenerationInput {
        GenerationInput::from_form(
            &self.birthdate,
            &self.birthtime,
            &self.name,
            self.gender,
            &self.dream,
        )
    }
}

#[derive(Debug, Default)]
pub struct LuckyPage {
    pub form: LuckyForm,
    result: Option<Generated>,
    /// Input the shown result was generated from
    result_input: Option<GenerationInput>,
    countdown: String,
}

impl LuckyPage {
    pub fn show(&mut self, generated: Generated, input: GenerationInput) {
        self.result = Some(generated);
        self.result_input = Some(input);
    }

    pub fn result(&self) -> Option<&Generated> {
        self.result.as_ref()
    }

    pub fn countdown(&self) -> &str {
        &self.countdown
    }

    /// Refresh the countdown; a result from an earlier week is cleared
    pub fn tick(&mut self, now: NaiveDateTime) {
        self.countdown = countdown_text(now);
        let current = week_key(now.date());
        if self.result.as_ref().is_some_and(|r| r.week != current) {
            tracing::info!("🗓️  Week rolled over to {current}; clearing result");
            self.result = None;
            self.result_input = None;
        }
    }
}

/// `Next refresh in Hh Mm Ss`
pub fn countdown_text(now: NaiveDateTime) -> String {
    let remaining = (next_refresh(now) - now).num_seconds().max(0);
    format!(
        "Next refresh in {}h {}m {}s",
        remaining / 3600,
        (remaining % 3600) / 60,
        remaining % 60
    )
}

fn ball(number: u8) -> Element<'static, Message> {
    let (r, g, b) = NumberBand::of(number).rgb();
    container(text(number.to_string()).size(18))
        .center(Length::Fixed(44.0))
        .style(move |_theme| container::Style {
            text_color: Some(Color::WHITE),
            background: Some(Color::from_rgb8(r, g, b).into()),
            border: Border {
                radius: 22.0.into(),
                ..Border::default()
            },
            ..container::Style::default()
        })
        .into()
}

fn balls(numbers: &[u8]) -> Row<'static, Message> {
    Row::with_children(numbers.iter().map(|&n| ball(n))).spacing(8)
}

fn analysis_view(numbers: &[u8; 6]) -> Column<'static, Message> {
    let a = NumberAnalysis::of(numbers);
    let ranges = NumberBand::ALL
        .iter()
        .zip(a.ranges)
        .map(|(band, count)| format!("{}: {}", band.label(), count))
        .collect::<Vec<_>>()
        .join("  ");

    column![
        text("Analysis").size(18),
        text(format!("Sum {}  Average {:.1}", a.sum, a.average)),
        text(format!(
            "Odd {} / Even {}{}",
            a.odd,
            a.even,
            if a.is_balanced() { "  (balanced)" } else { "" }
        )),
        text(format!(
            "Average gap {:.1}  Last digits {}{}",
            a.average_gap,
            a.distinct_last_digits,
            if a.is_diverse() { "  (diverse)" } else { "" }
        )),
        text(ranges),
        text(format!(
            "Spread {:.1} (theoretical {:.1})",
            a.spread, a.theoretical_spread
        )),
        text(if a.has_consecutive {
            "Contains consecutive numbers"
        } else {
            "No consecutive numbers"
        }),
        text(format!("Matches with recent winning numbers: {}", a.recent_matches)),
    ]
    .spacing(4)
}

fn dream_view(dream: &str) -> Option<Column<'static, Message>> {
    if dream.trim().is_empty() {
        return None;
    }
    let reading = read_dream(dream);
    let themes = if reading.themes.is_empty() {
        "No particular theme".to_string()
    } else {
        reading.themes.join(", ")
    };
    Some(
        column![
            text("Dream reading").size(18),
            text(themes),
            balls(&reading.lucky_numbers).wrap(),
        ]
        .spacing(6),
    )
}

fn past_week_row(record: &HistoryRecord) -> Element<'static, Message> {
    row![
        text(format!("{} {}", record.date, record.time)).width(Length::Fixed(160.0)),
        balls(&record.numbers),
    ]
    .spacing(12)
    .into()
}

pub fn view<'a>(page: &'a LuckyPage, generator: Option<&'a LuckyGenerator>) -> Element<'a, Message> {
    let form = &page.form;

    let fields = column![
        text_input("Birthdate (YYYYMMDD)", &form.birthdate).on_input(Message::BirthdateChanged),
        text_input("Birth time (HHMM, optional)", &form.birthtime).on_input(Message::BirthtimeChanged),
        text_input("Name (optional)", &form.name).on_input(Message::NameChanged),
        row![
            pick_list(Gender::ALL, form.gender, Message::GenderSelected).placeholder("Gender (optional)"),
            button("Clear").on_press_maybe(form.gender.map(|_| Message::GenderCleared)),
        ]
        .spacing(8),
        text_input("Last night's dream (optional)", &form.dream).on_input(Message::DreamChanged),
        button("Generate").on_press_maybe(generator.map(|_| Message::Generate)).padding(10),
        text(page.countdown()).size(14),
    ]
    .spacing(10)
    .max_width(420.0);

    let mut content = column![text("This Week's Lucky Numbers").size(32), fields].spacing(20);

    if let Some(result) = page.result() {
        let mut section = column![
            text(format!("Week of {}", result.week)).size(18),
            balls(&result.numbers),
        ]
        .spacing(10);
        if !result.fresh {
            section = section.push(text("These are your saved numbers for this week.").size(14));
        }
        section = section.push(analysis_view(&result.numbers));
        if let Some(dream) = page.result_input.as_ref().and_then(|input| dream_view(&input.dream)) {
            section = section.push(dream);
        }
        content = content.push(section);
    }

    if let Some(generator) = generator {
        let current = page
            .result()
            .map(|r| r.week.clone())
            .unwrap_or_else(|| week_key(chrono::Local::now().date_naive()));
        let past = generator.history().past_weeks(&current);
        if !past.is_empty() {
            content = content.push(
                column![text("Past weeks").size(18)]
                    .extend(past.into_iter().map(past_week_row))
                    .spacing(6),
            );
        }
    }

    content.into()
}
