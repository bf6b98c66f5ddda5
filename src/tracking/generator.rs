//! Profile fabrication
//!
//! Builds a complete `TrackingData` record from draws seeded by the phone
//! number. Every field except the absolute `last_seen` instant is a pure
//! function of the number string.

use chrono::{Duration, TimeZone, Utc};

use super::models::{
    AccountInfo, ActivityPattern, ApproximateLocation, Coordinates, DayActivity, PrivacySettings,
    TrackingData, VisibilityLevel,
};
use super::seed::SeededRng;

/// Location bases: (city, state, lat, lng)
const BRAZILIAN_CITIES: &[(&str, &str, f64, f64)] = &[
    ("São Paulo", "SP", -23.5505, -46.6333),
    ("Rio de Janeiro", "RJ", -22.9068, -43.1729),
    ("Brasília", "DF", -15.8267, -47.9218),
    ("Salvador", "BA", -12.9714, -38.5014),
    ("Fortaleza", "CE", -3.7319, -38.5267),
    ("Belo Horizonte", "MG", -19.9191, -43.9386),
    ("Manaus", "AM", -3.1190, -60.0217),
    ("Curitiba", "PR", -25.4244, -49.2654),
    ("Recife", "PE", -8.0476, -34.8770),
    ("Goiânia", "GO", -16.6869, -49.2648),
];

const VISIBILITY_LEVELS: [VisibilityLevel; 3] = [
    VisibilityLevel::Everyone,
    VisibilityLevel::Contacts,
    VisibilityLevel::Nobody,
];

/// Fabricate the full profile for a phone number.
///
/// Repeated calls with the same number produce identical content; only
/// `last_seen` shifts, because its fixed offset is applied to the current
/// instant.
pub fn generate_profile(phone_number: &str) -> TrackingData {
    let rng = SeededRng::from_phone(phone_number);

    let (city, state, base_lat, base_lng) =
        BRAZILIAN_CITIES[rng.draw(BRAZILIAN_CITIES.len() as u64) as usize];

    // 30% online
    let is_online = rng.draw(10) < 3;
    // 1-48 hours ago
    let last_seen_hours = rng.draw(48) + 1;

    let weekly_activity = vec![
        DayActivity { day: "Segunda".into(), hours: rng.draw(8) as u32 + 2 },
        DayActivity { day: "Terça".into(), hours: rng.draw(8) as u32 + 2 },
        DayActivity { day: "Quarta".into(), hours: rng.draw(8) as u32 + 2 },
        DayActivity { day: "Quinta".into(), hours: rng.draw(8) as u32 + 2 },
        DayActivity { day: "Sexta".into(), hours: rng.draw(10) as u32 + 3 },
        DayActivity { day: "Sábado".into(), hours: rng.draw(12) as u32 + 4 },
        DayActivity { day: "Domingo".into(), hours: rng.draw(10) as u32 + 3 },
    ];

    // Year 2018-2023, month 1-12, day 1-28: always a valid calendar date
    let registration_date = Utc
        .with_ymd_and_hms(
            2018 + rng.draw(6) as i32,
            rng.draw(12) as u32 + 1,
            rng.draw(28) as u32 + 1,
            0,
            0,
            0,
        )
        .single()
        .expect("registration date components are always in range");

    TrackingData {
        phone_number: phone_number.to_string(),
        is_online,
        last_seen: Utc::now() - Duration::hours(last_seen_hours as i64),
        approximate_location: ApproximateLocation {
            city: city.to_string(),
            state: state.to_string(),
            country: "Brasil".to_string(),
            coordinates: Coordinates {
                // Jitter of at most 0.1 degrees around the city base
                lat: base_lat + (rng.draw(200) as f64 - 100.0) / 1000.0,
                lng: base_lng + (rng.draw(200) as f64 - 100.0) / 1000.0,
            },
        },
        account_info: AccountInfo {
            has_profile_picture: rng.draw(10) > 2,
            has_status: rng.draw(10) > 4,
            registration_date,
            is_business_account: rng.draw(10) < 1,
        },
        activity_pattern: ActivityPattern {
            // Between 8h and 20h
            most_active_hour: rng.draw(12) as u32 + 8,
            average_online_time: format!("{}h{}0min", rng.draw(8) + 2, rng.draw(6)),
            weekly_activity,
        },
        privacy_settings: PrivacySettings {
            last_seen_visibility: VISIBILITY_LEVELS[rng.draw(3) as usize],
            profile_picture_visibility: VISIBILITY_LEVELS[rng.draw(3) as usize],
            status_visibility: VISIBILITY_LEVELS[rng.draw(3) as usize],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_profile_is_deterministic_per_number() {
        let a = generate_profile("11999998888");
        let b = generate_profile("11999998888");

        assert_eq!(a.phone_number, b.phone_number);
        assert_eq!(a.is_online, b.is_online);
        assert_eq!(a.approximate_location, b.approximate_location);
        assert_eq!(a.account_info, b.account_info);
        assert_eq!(a.activity_pattern, b.activity_pattern);
        assert_eq!(a.privacy_settings, b.privacy_settings);
    }

    #[test]
    fn test_weekly_activity_covers_the_week_in_order() {
        let profile = generate_profile("11999998888");
        let days: Vec<&str> = profile
            .activity_pattern
            .weekly_activity
            .iter()
            .map(|d| d.day.as_str())
            .collect();
        assert_eq!(
            days,
            ["Segunda", "Terça", "Quarta", "Quinta", "Sexta", "Sábado", "Domingo"]
        );
    }

    #[test]
    fn test_field_bounds() {
        for phone in ["11999998888", "1139998888", "21988887777"] {
            let profile = generate_profile(phone);

            let hour = profile.activity_pattern.most_active_hour;
            assert!((8..=20).contains(&hour), "most_active_hour {hour} out of range");

            let year = profile.account_info.registration_date.year();
            assert!((2018..=2023).contains(&year), "registration year {year} out of range");
            assert!(profile.account_info.registration_date < Utc::now());

            for day in &profile.activity_pattern.weekly_activity {
                assert!(day.hours >= 2, "{} hours too low", day.day);
                assert!(day.hours <= 16, "{} hours too high", day.day);
            }
        }
    }

    #[test]
    fn test_coordinates_stay_near_a_known_city() {
        let profile = generate_profile("11999998888");
        let coords = profile.approximate_location.coordinates;

        let (_, _, base_lat, base_lng) = BRAZILIAN_CITIES
            .iter()
            .find(|(city, _, _, _)| *city == profile.approximate_location.city)
            .copied()
            .expect("profile city comes from the table");

        assert!((coords.lat - base_lat).abs() <= 0.1);
        assert!((coords.lng - base_lng).abs() <= 0.1);
        assert_eq!(profile.approximate_location.country, "Brasil");
    }

    #[test]
    fn test_last_seen_is_in_the_past() {
        let profile = generate_profile("11999998888");
        let age = Utc::now() - profile.last_seen;
        assert!(age >= Duration::hours(1));
        assert!(age <= Duration::hours(49));
    }

    #[test]
    fn test_profile_keeps_the_raw_number() {
        let profile = generate_profile("(11) 99999-8888");
        assert_eq!(profile.phone_number, "(11) 99999-8888");
    }
}
