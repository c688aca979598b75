use super::*;
use rstest::rstest;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[rstest]
#[case(dec!(90), "90.00")]
#[case(dec!(90.5), "90.50")]
#[case(dec!(0.01), "0.01")]
#[case(dec!(12.340), "12.34")]
fn test_validate_amount_rescales(#[case] input: Decimal, #[case] expected: &str) {
    let amount = validate_amount(input).unwrap();
    assert_eq!(amount.to_string(), expected);
    assert_eq!(amount.scale(), MONEY_SCALE);
}

#[rstest]
#[case(dec!(0))]
#[case(dec!(-5.00))]
fn test_validate_amount_rejects_non_positive(#[case] input: Decimal) {
    assert_eq!(validate_amount(input), Err(MoneyError::NotPositive(input)));
}

#[test]
fn test_validate_amount_rejects_excess_precision() {
    assert_eq!(
        validate_amount(dec!(10.005)),
        Err(MoneyError::TooPrecise(dec!(10.005)))
    );
}

#[test]
fn test_parse_amount() {
    assert_eq!(parse_amount("90.00").unwrap(), dec!(90.00));
    assert_eq!(parse_amount(" 15 ").unwrap(), dec!(15.00));
    assert!(matches!(parse_amount("abc"), Err(MoneyError::Invalid(_))));
    assert!(matches!(parse_amount(""), Err(MoneyError::Invalid(_))));
    assert!(matches!(parse_amount("-1"), Err(MoneyError::NotPositive(_))));
}

#[rstest]
#[case(dec!(1000000000000.00))]
#[case(dec!(999999999999.991))]
#[case(Decimal::MAX)]
fn test_validate_amount_rejects_oversized(#[case] input: Decimal) {
    assert_eq!(validate_amount(input), Err(MoneyError::TooLarge(input)));
}

#[test]
fn test_validate_amount_accepts_column_maximum() {
    let amount = validate_amount(dec!(999999999999.99)).unwrap();
    assert_eq!(amount, MAX_AMOUNT);
    assert_eq!(MAX_AMOUNT.to_string(), "999999999999.99");
    assert_eq!(amount.scale(), MONEY_SCALE);
    assert!(matches!(
        parse_amount("79228162514264337593543950335"),
        Err(MoneyError::TooLarge(_))
    ));
}
