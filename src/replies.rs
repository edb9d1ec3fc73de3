use crate::weather::{WeatherError, WeatherReport};

pub const GREETING: &str = "Привіт! Використовуйте /weather <місто>, щоб отримати погоду.";
pub const ASK_CITY: &str = "Будь ласка, введіть назву міста.";
pub const STOPPING: &str = "Бот зупиняється...";
pub const CITY_NOT_FOUND: &str =
    "Місто не знайдено. Будь ласка, перевірте назву міста та спробуйте ще раз.";
pub const FETCH_PROBLEM: &str =
    "Вибачте, виникла проблема з отриманням погодних даних. Перевірте правильність написання назви міста.";
pub const UNKNOWN_ERROR: &str = "Вибачте, виникла невідома помилка.";

// The city echoed back is the one the user typed, not the provider's name.
pub fn format_report(city: &str, report: &WeatherReport) -> String {
    format!(
        "Погода у місті {}:\nОпис: {}\nТемпература: {}°C\nВологість: {}%\nШвидкість вітру: {} м/с",
        city,
        capitalize(&report.description),
        report.temperature_c,
        report.humidity_pct,
        report.wind_speed_mps,
    )
}

pub fn describe_error(err: &WeatherError) -> &'static str {
    match err {
        WeatherError::CityNotFound => CITY_NOT_FOUND,
        WeatherError::Status { .. } => FETCH_PROBLEM,
        WeatherError::Unexpected(_) => UNKNOWN_ERROR,
    }
}

// First character uppercased, the rest lowercased.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalize_uppercases_head_and_lowercases_tail() {
        assert_eq!(capitalize("clear sky"), "Clear sky");
        assert_eq!(capitalize("clear SKY"), "Clear sky");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("ясно"), "Ясно");
    }

    #[test]
    fn report_text_has_the_expected_shape() {
        let report = WeatherReport {
            description: "clear sky".to_string(),
            temperature_c: 15.2,
            humidity_pct: 60,
            wind_speed_mps: 3.1,
        };
        assert_eq!(
            format_report("Kyiv", &report),
            "Погода у місті Kyiv:\nОпис: Clear sky\nТемпература: 15.2°C\nВологість: 60%\nШвидкість вітру: 3.1 м/с"
        );
    }

    #[test]
    fn every_error_variant_maps_to_a_fixed_reply() {
        assert_eq!(describe_error(&WeatherError::CityNotFound), CITY_NOT_FOUND);
        assert_eq!(
            describe_error(&WeatherError::Status {
                status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                body: "boom".to_string(),
            }),
            FETCH_PROBLEM
        );
        assert_eq!(
            describe_error(&WeatherError::Unexpected(anyhow::anyhow!("socket"))),
            UNKNOWN_ERROR
        );
    }
}
