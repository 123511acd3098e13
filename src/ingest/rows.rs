use crate::domain::property::NewProperty;
use crate::domain::states::state_code_for_name;
use serde::Deserialize;

/// One record of the realtor export. Unknown columns are ignored.
#[derive(Debug, Deserialize)]
pub struct CsvRow {
    pub status: Option<String>,
    pub price: Option<String>,
    pub bed: Option<String>,
    pub bath: Option<String>,
    pub acre_lot: Option<String>,
    pub full_address: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub house_size: Option<String>,
    pub sold_date: Option<String>,
}

impl CsvRow {
    pub fn into_property(self) -> NewProperty {
        let state_code = self
            .state
            .as_deref()
            .and_then(state_code_for_name)
            .map(str::to_string);

        NewProperty {
            status: self.status,
            price: float_or_zero(self.price.as_deref()),
            bed: whole_number(self.bed.as_deref()),
            bath: whole_number(self.bath.as_deref()),
            acre_lot: float_or_zero(self.acre_lot.as_deref()),
            full_address: self.full_address,
            street: self.street,
            city: self.city,
            state: self.state,
            zip_code: self
                .zip_code
                .as_deref()
                .map(str::trim)
                .filter(|z| !z.is_empty())
                .map(normalize_zip),
            house_size: float_or_zero(self.house_size.as_deref()),
            sold_date: self.sold_date,
            state_code,
            price_per_sq_ft: None,
            price_per_acre: None,
        }
        .with_derived_fields()
    }
}

fn float_or_zero(raw: Option<&str>) -> f64 {
    raw.and_then(leading_float)
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Integer prefix; zero and garbage are both `None`.
fn whole_number(raw: Option<&str>) -> Option<i64> {
    raw.and_then(leading_integer).filter(|v| *v != 0)
}

/// Length of an optional sign followed by ASCII digits.
fn signed_digits(bytes: &[u8]) -> (usize, usize) {
    let sign = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let digits = bytes[sign..].iter().take_while(|b| b.is_ascii_digit()).count();
    (sign, digits)
}

/// Longest decimal number at the start of `raw`, so `"1500 sqft"` reads as 1500.
fn leading_float(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();

    let (sign, int_digits) = signed_digits(bytes);
    let mut end = sign + int_digits;
    let mut digits = int_digits;

    if bytes.get(end) == Some(&b'.') {
        let frac = bytes[end + 1..].iter().take_while(|b| b.is_ascii_digit()).count();
        end += 1 + frac;
        digits += frac;
    }
    if digits == 0 {
        return None;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let (exp_sign, exp_digits) = signed_digits(&bytes[end + 1..]);
        if exp_digits > 0 {
            end += 1 + exp_sign + exp_digits;
        }
    }

    s[..end].parse().ok()
}

fn leading_integer(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (sign, digits) = signed_digits(s.as_bytes());
    if digits == 0 {
        return None;
    }
    s[..sign + digits].parse().ok()
}

/// Exports sometimes carry zips as floats (`601.0`) with leading zeros lost.
fn normalize_zip(raw: &str) -> String {
    let zip = raw.trim();
    let zip = zip.strip_suffix(".0").unwrap_or(zip);
    format!("{zip:0>5}")
}
