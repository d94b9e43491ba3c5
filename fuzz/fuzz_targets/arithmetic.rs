#![no_main]

use bigdecimal_engine::{ConfigOptions, Decimal, Engine, ModuloMode, RoundingMode};

#[derive(Debug, arbitrary::Arbitrary)]
struct Data {
    a: (i64, i16),
    b: (i64, i16),
    precision: u8,
    rounding: u8,
    modulo: u8,
}

libfuzzer_sys::fuzz_target!(|data: Data| {
    let options = ConfigOptions::new()
        .precision(data.precision as i64 + 1)
        .rounding(RoundingMode::from_code((data.rounding % 9) as i64).unwrap_or_default());
    let Ok(engine) = Engine::new(&options) else {
        return;
    };
    let a = Decimal::new(data.a.0, data.a.1 as i64);
    let b = Decimal::new(data.b.0, data.b.1 as i64);
    let modulo = ModuloMode::from_code([0, 1, 3, 6, 9][(data.modulo % 5) as usize]).unwrap_or_default();

    let precision = engine.config().precision();
    for result in [
        engine.add(&a, &b),
        engine.sub(&a, &b),
        engine.mul(&a, &b),
        engine.div(&a, &b),
        engine.modulo_with(&a, &b, modulo),
    ] {
        assert!(result.significant_digits() <= precision);
    }
    let _ = engine.to_string(&engine.sqrt(&a));
});
