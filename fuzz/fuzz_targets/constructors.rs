#![no_main]

use bigdecimal_engine::{decimal, Decimal};

#[derive(Debug, arbitrary::Arbitrary)]
struct Data<'a> {
    generic_str: &'a str,
    new_coefficient: i64,
    new_exponent: i64,
}

libfuzzer_sys::fuzz_target!(|data: Data<'_>| {
    let _ = serde_json::from_str::<Decimal>(data.generic_str);

    if let Ok(value) = decimal(data.generic_str) {
        if !value.is_nan() {
            assert_eq!(value, decimal(value.to_string().as_str()).unwrap());
        }
    }

    let _ = Decimal::new(data.new_coefficient, data.new_exponent).to_string();
});
