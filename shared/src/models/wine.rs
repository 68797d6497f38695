//! The wine record.
//!
//! A wine is immutable after construction except for its rating/comment
//! pair, which starts unset and may transition exactly once to rated.
//! The delimited text form has nine fields in declaration order; dates
//! are stored as `DD/MM/YY` with two-digit years counted from 2000, and
//! prices with exactly two fractional digits.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::codec::{join_fields, split_fields};
use crate::core::errors::{CoreError, CoreResult, ParseError};
use crate::core::format::FormatValue;
use crate::models::{FieldValue, IdSequence, Record};

/// Lowest accepted rating
pub const RATING_MIN: u8 = 0;

/// Highest accepted rating
pub const RATING_MAX: u8 = 5;

/// Wine colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WineColor {
    Red,
    White,
    Rose,
    Sparkling,
}

impl WineColor {
    /// The canonical lowercase label used in the stored form
    pub fn label(&self) -> &'static str {
        match self {
            WineColor::Red => "red",
            WineColor::White => "white",
            WineColor::Rose => "rose",
            WineColor::Sparkling => "sparkling",
        }
    }
}

impl fmt::Display for WineColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for WineColor {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "red" => Ok(WineColor::Red),
            "white" => Ok(WineColor::White),
            "rose" => Ok(WineColor::Rose),
            "sparkling" => Ok(WineColor::Sparkling),
            other => Err(ParseError::invalid_field("color", other)),
        }
    }
}

/// One wine of the cellar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wine {
    id: u32,
    purchased_on: NaiveDate,
    color: WineColor,
    appellation: String,
    vintage: u16,
    name: String,
    price: f64,
    rating: Option<u8>,
    comment: Option<String>,
}

impl Wine {
    /// Build an unrated wine with an explicit identity and purchase date
    pub fn new(
        id: u32,
        purchased_on: NaiveDate,
        color: WineColor,
        appellation: impl Into<String>,
        vintage: u16,
        name: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            id,
            purchased_on,
            color,
            appellation: appellation.into(),
            vintage,
            name: name.into(),
            price,
            rating: None,
            comment: None,
        }
    }

    /// Build an already-rated wine, bypassing the state machine.
    ///
    /// Intended for reconstructing stored data and fixtures; live rating
    /// goes through [`Wine::rate`].
    #[allow(clippy::too_many_arguments)]
    pub fn with_rating(
        id: u32,
        purchased_on: NaiveDate,
        color: WineColor,
        appellation: impl Into<String>,
        vintage: u16,
        name: impl Into<String>,
        price: f64,
        rating: u8,
        comment: impl Into<String>,
    ) -> Self {
        Self {
            rating: Some(rating),
            comment: Some(comment.into()),
            ..Self::new(id, purchased_on, color, appellation, vintage, name, price)
        }
    }

    /// Factory for wines created during a run: takes the next identity
    /// from the sequence and stamps today's date as the purchase date
    pub fn create(
        ids: &mut IdSequence,
        color: WineColor,
        appellation: impl Into<String>,
        vintage: u16,
        name: impl Into<String>,
        price: f64,
    ) -> Self {
        let today = chrono::Local::now().date_naive();
        Self::new(ids.next_id(), today, color, appellation, vintage, name, price)
    }

    pub fn purchased_on(&self) -> NaiveDate {
        self.purchased_on
    }

    pub fn color(&self) -> WineColor {
        self.color
    }

    pub fn appellation(&self) -> &str {
        &self.appellation
    }

    pub fn vintage(&self) -> u16 {
        self.vintage
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    /// Has this wine been tasted and rated?
    pub fn is_rated(&self) -> bool {
        self.rating.is_some()
    }

    pub fn rating(&self) -> Option<u8> {
        self.rating
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Rate this wine, exactly once.
    ///
    /// Rating an already-rated wine or passing a rating outside
    /// `RATING_MIN..=RATING_MAX` is a domain error and leaves the wine
    /// unchanged.
    pub fn rate(&mut self, rating: u8, comment: impl Into<String>) -> CoreResult<()> {
        if self.is_rated() {
            return Err(CoreError::domain(format!(
                "wine {} is already rated",
                self.id
            )));
        }
        if !(RATING_MIN..=RATING_MAX).contains(&rating) {
            return Err(CoreError::domain(format!(
                "rating {rating} is outside {RATING_MIN}..={RATING_MAX}"
            )));
        }

        self.rating = Some(rating);
        self.comment = Some(comment.into());
        Ok(())
    }

    /// The stored `DD/MM/YY` form of the purchase date
    fn date_text(&self) -> String {
        self.purchased_on.format("%d/%m/%y").to_string()
    }
}

/// Parse a `DD/MM/YY` date; two-digit years count from 2000
fn parse_date(text: &str) -> Result<NaiveDate, ParseError> {
    let invalid = || ParseError::invalid_field("purchased_on", text);

    let mut parts = text.splitn(3, '/');
    let day: u32 = parts.next().and_then(|p| p.parse().ok()).ok_or_else(invalid)?;
    let month: u32 = parts.next().and_then(|p| p.parse().ok()).ok_or_else(invalid)?;
    let year: i32 = parts.next().and_then(|p| p.parse().ok()).ok_or_else(invalid)?;

    NaiveDate::from_ymd_opt(2000 + year, month, day).ok_or_else(invalid)
}

impl Record for Wine {
    const TYPE_NAME: &'static str = "wine";

    const FIELD_NAMES: &'static [&'static str] = &[
        "id",
        "purchased_on",
        "color",
        "appellation",
        "vintage",
        "name",
        "price",
        "rating",
        "comment",
    ];

    const DEFAULT_TEMPLATE: &'static str = "%I [%T - %.2P$]: %A %M, %N (%D) => %n {%c}";

    fn id(&self) -> u32 {
        self.id
    }

    fn field_value(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(FieldValue::Integer(self.id as i64)),
            "purchased_on" => Some(FieldValue::Date(self.purchased_on)),
            "color" => Some(FieldValue::Symbol(self.color.label())),
            "appellation" => Some(FieldValue::Text(self.appellation.clone())),
            "vintage" => Some(FieldValue::Integer(self.vintage as i64)),
            "name" => Some(FieldValue::Text(self.name.clone())),
            "price" => Some(FieldValue::Float(self.price)),
            "rating" => self.rating.map(|r| FieldValue::Integer(r as i64)),
            "comment" => self.comment.clone().map(FieldValue::Text),
            _ => None,
        }
    }

    fn encode_delimited(&self, separator: char) -> String {
        let fields = [
            self.id.to_string(),
            self.date_text(),
            self.color.label().to_string(),
            self.appellation.clone(),
            self.vintage.to_string(),
            self.name.clone(),
            format!("{:.2}", self.price),
            self.rating.map(|r| r.to_string()).unwrap_or_default(),
            self.comment.clone().unwrap_or_default(),
        ];
        join_fields(&fields, separator)
    }

    fn decode_delimited(line: &str, separator: char) -> Result<Self, ParseError> {
        let parts = split_fields(line, separator, Self::FIELD_NAMES.len())?;

        let id = parts[0]
            .parse()
            .map_err(|_| ParseError::invalid_field("id", parts[0]))?;
        let purchased_on = parse_date(parts[1])?;
        let color = parts[2].parse()?;
        let vintage = parts[4]
            .parse()
            .map_err(|_| ParseError::invalid_field("vintage", parts[4]))?;
        let price: f64 = parts[6]
            .parse()
            .map_err(|_| ParseError::invalid_field("price", parts[6]))?;
        if !price.is_finite() || price < 0.0 {
            return Err(ParseError::invalid_field("price", parts[6]));
        }

        let rating = match parts[7] {
            "" => None,
            text => Some(
                text.parse()
                    .map_err(|_| ParseError::invalid_field("rating", text))?,
            ),
        };
        let comment = match parts[8] {
            "" => None,
            text => Some(text.to_string()),
        };

        Ok(Self {
            id,
            purchased_on,
            color,
            appellation: parts[3].to_string(),
            vintage,
            name: parts[5].to_string(),
            price,
            rating,
            comment,
        })
    }

    fn placeholder(&self, code: char) -> Option<FormatValue> {
        match code {
            'I' => Some(FormatValue::Int(self.id as i64)),
            'D' => Some(FormatValue::Str(self.date_text())),
            'T' => Some(FormatValue::Str(self.color.label().to_string())),
            'A' => Some(FormatValue::Str(self.appellation.clone())),
            'M' => Some(FormatValue::Int(self.vintage as i64)),
            'N' => Some(FormatValue::Str(self.name.clone())),
            'P' => Some(FormatValue::Float(self.price)),
            'n' => Some(match self.rating {
                Some(rating) => FormatValue::Int(rating as i64),
                None => FormatValue::Str(String::new()),
            }),
            'c' => Some(FormatValue::Str(self.comment.clone().unwrap_or_default())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn purchase_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2014, 10, 11).unwrap()
    }

    fn chianti() -> Wine {
        Wine::new(
            10,
            purchase_date(),
            WineColor::Red,
            "Chianti Classico",
            2011,
            "Fontodi",
            20.99,
        )
    }

    fn chianti_rated() -> Wine {
        Wine::with_rating(
            11,
            purchase_date(),
            WineColor::Red,
            "Chianti Classico",
            2011,
            "Fontodi",
            20.99,
            4,
            "Tres bon!",
        )
    }

    #[test]
    fn test_new_wine_is_unrated() {
        let wine = chianti();
        assert_eq!(wine.id(), 10);
        assert_eq!(wine.vintage(), 2011);
        assert!(!wine.is_rated());
        assert_eq!(wine.rating(), None);
        assert_eq!(wine.comment(), None);
    }

    #[test]
    fn test_create_takes_the_next_identity() {
        let mut ids = IdSequence::new();
        ids.observe(10);

        let wine = Wine::create(&mut ids, WineColor::Red, "Chianti", 2012, "Fontodi", 21.99);
        assert_eq!(wine.id(), 11);
        assert!(!wine.is_rated());
        assert_eq!(ids.high_water(), Some(11));
    }

    #[test]
    fn test_rating_transitions_once() {
        let mut wine = chianti();
        wine.rate(3, "Assez bon").unwrap();

        assert!(wine.is_rated());
        assert_eq!(wine.rating(), Some(3));
        assert_eq!(wine.comment(), Some("Assez bon"));

        let err = wine.rate(5, "encore").unwrap_err();
        assert_matches!(err, CoreError::Domain { .. });
        assert_eq!(wine.rating(), Some(3));
        assert_eq!(wine.comment(), Some("Assez bon"));
    }

    #[test]
    fn test_out_of_range_rating_has_no_effect() {
        let mut wine = chianti();
        let err = wine.rate(RATING_MAX + 1, "trop").unwrap_err();
        assert_matches!(err, CoreError::Domain { .. });
        assert!(!wine.is_rated());
    }

    #[test]
    fn test_default_rendering_unrated() {
        assert_eq!(
            chianti().render(None).unwrap(),
            "10 [red - 20.99$]: Chianti Classico 2011, Fontodi (11/10/14) =>  {}"
        );
    }

    #[test]
    fn test_default_rendering_rated() {
        assert_eq!(
            chianti_rated().render(None).unwrap(),
            "11 [red - 20.99$]: Chianti Classico 2011, Fontodi (11/10/14) => 4 {Tres bon!}"
        );
    }

    #[test]
    fn test_rendering_with_width_and_justification() {
        let wine = chianti();
        assert_eq!(wine.render(Some("%4I:%-4I:%.4I")).unwrap(), "  10:10  :0010");
        assert_eq!(
            wine.render(Some("%4I:%-8.3P:%8.1P")).unwrap(),
            "  10:20.990  :    21.0"
        );
    }

    #[test]
    fn test_rendering_rejects_foreign_specifiers() {
        assert!(chianti().render(Some("xxx %X %s %T")).is_err());
        assert!(chianti().render(Some("xxx %d %T %T")).is_err());
    }

    #[test]
    fn test_encode_unrated() {
        assert_eq!(
            chianti().encode_delimited(':'),
            "10:11/10/14:red:Chianti Classico:2011:Fontodi:20.99::"
        );
    }

    #[test]
    fn test_encode_rated() {
        assert_eq!(
            chianti_rated().encode_delimited(':'),
            "11:11/10/14:red:Chianti Classico:2011:Fontodi:20.99:4:Tres bon!"
        );
    }

    #[test]
    fn test_decode_round_trip() {
        for wine in [chianti(), chianti_rated()] {
            for separator in [':', '|', ';'] {
                let line = wine.encode_delimited(separator);
                assert_eq!(Wine::decode_delimited(&line, separator).unwrap(), wine);
            }
        }
    }

    #[test]
    fn test_comment_may_contain_the_separator() {
        let mut wine = chianti();
        wine.rate(5, "rich, dark: almost inky").unwrap();

        let line = wine.encode_delimited(':');
        assert_eq!(Wine::decode_delimited(&line, ':').unwrap(), wine);
    }

    #[test]
    fn test_decode_rejects_wrong_field_count() {
        assert_matches!(
            Wine::decode_delimited("10:11/10/14:red:Chianti", ':'),
            Err(ParseError::FieldCount {
                expected: 9,
                found: 4
            })
        );
    }

    #[test]
    fn test_decode_rejects_bad_fields() {
        let bad_id = "x:11/10/14:red:Chianti:2011:Fontodi:20.99::";
        assert_matches!(
            Wine::decode_delimited(bad_id, ':'),
            Err(ParseError::InvalidField { field: "id", .. })
        );

        let bad_date = "10:32/10/14:red:Chianti:2011:Fontodi:20.99::";
        assert_matches!(
            Wine::decode_delimited(bad_date, ':'),
            Err(ParseError::InvalidField {
                field: "purchased_on",
                ..
            })
        );

        let bad_color = "10:11/10/14:purple:Chianti:2011:Fontodi:20.99::";
        assert_matches!(
            Wine::decode_delimited(bad_color, ':'),
            Err(ParseError::InvalidField { field: "color", .. })
        );

        let bad_price = "10:11/10/14:red:Chianti:2011:Fontodi:cheap::";
        assert_matches!(
            Wine::decode_delimited(bad_price, ':'),
            Err(ParseError::InvalidField { field: "price", .. })
        );
    }

    #[test]
    fn test_two_digit_years_count_from_2000() {
        let line = "0:01/02/95:red:Rioja:1990:Vina:9.99::";
        let wine = Wine::decode_delimited(line, ':').unwrap();
        assert_eq!(
            wine.purchased_on(),
            NaiveDate::from_ymd_opt(2095, 2, 1).unwrap()
        );
    }

    #[test]
    fn test_field_values_by_name() {
        let wine = chianti_rated();
        assert_eq!(wine.field_value("id"), Some(FieldValue::Integer(11)));
        assert_eq!(wine.field_value("color"), Some(FieldValue::Symbol("red")));
        assert_eq!(wine.field_value("rating"), Some(FieldValue::Integer(4)));
        assert_eq!(wine.field_value("bouquet"), None);

        // The optional pair reads as unset while unrated
        assert_eq!(chianti().field_value("rating"), None);
        assert_eq!(chianti().field_value("comment"), None);
    }

    #[test]
    fn test_json_round_trip() {
        let wine = chianti_rated();
        let json = serde_json::to_string(&wine).unwrap();
        assert_eq!(serde_json::from_str::<Wine>(&json).unwrap(), wine);
    }
}
