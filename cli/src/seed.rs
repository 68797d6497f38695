//! Demonstration dataset written by `init --seed`.

use chrono::NaiveDate;

use vintry_shared::models::{Wine, WineColor};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// A small, varied cellar: every color represented, a few wines already
/// rated so listings and filters have something to show.
pub fn demonstration_cellar() -> Vec<Wine> {
    vec![
        Wine::new(
            0,
            date(2023, 3, 14),
            WineColor::Red,
            "Chianti Classico",
            2019,
            "Fontodi",
            27.50,
        ),
        Wine::with_rating(
            1,
            date(2023, 3, 14),
            WineColor::Red,
            "Barolo",
            2017,
            "Vietti Castiglione",
            49.99,
            5,
            "Magnifique, a racheter",
        ),
        Wine::new(
            2,
            date(2023, 5, 2),
            WineColor::White,
            "Chablis",
            2021,
            "Dauvissat",
            34.50,
        ),
        Wine::with_rating(
            3,
            date(2023, 5, 2),
            WineColor::White,
            "Sancerre",
            2021,
            "Vacheron",
            28.00,
            3,
            "Correct sans plus",
        ),
        Wine::new(
            4,
            date(2023, 7, 21),
            WineColor::Rose,
            "Tavel",
            2022,
            "Domaine Corne-Loup",
            14.25,
        ),
        Wine::new(
            5,
            date(2024, 1, 9),
            WineColor::Sparkling,
            "Champagne",
            2015,
            "Pol Roger",
            62.00,
        ),
        Wine::with_rating(
            6,
            date(2024, 1, 9),
            WineColor::Red,
            "Cotes-du-Rhone",
            2020,
            "Guigal",
            12.75,
            4,
            "Tres bon rapport qualite-prix",
        ),
        Wine::new(
            7,
            date(2024, 4, 30),
            WineColor::Red,
            "Rioja Reserva",
            2016,
            "La Rioja Alta",
            31.90,
        ),
    ]
}
