use bond_engine::valuation::{compute_bond, ValuationInput};
use chrono::{DateTime, Duration, Utc};
use common::decimal::{dec, Price};
use common::error::Error;
use common::model::market::{RawMarket, Terms};
use common::model::token::{Address, QuoteToken, Token};
use rust_decimal::Decimal;

fn ohm() -> Token {
    Token::new("OHM", "Olympus", "0xohm", 9)
}

fn dai() -> QuoteToken {
    QuoteToken::from(Token::new("DAI", "Dai", "0xdai", 18))
}

fn base_market(capacity: u128, max_payout: u128) -> RawMarket {
    RawMarket {
        capacity,
        capacity_in_quote: false,
        max_payout,
        quote_token: Address::from("0xdai"),
    }
}

fn fixed_term(vesting: u64) -> Terms {
    Terms {
        fixed_term: true,
        vesting,
        conclusion: 0,
    }
}

fn at(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap()
}

fn input<'a>(
    market: &'a RawMarket,
    terms: &'a Terms,
    base: &'a Token,
    quote: &'a QuoteToken,
    rate: Price,
) -> ValuationInput<'a> {
    ValuationInput {
        id: 7,
        market,
        terms,
        base_token: base,
        quote_token: quote,
        quote_token_per_base_token: rate,
        base_token_per_usd: dec!(10),
        quote_token_per_usd: dec!(1),
    }
}

#[test]
fn test_price_and_discount() {
    let (base, quote) = (ohm(), dai());
    let market = base_market(1_000_000_000_000, 10_000_000_000);
    let terms = fixed_term(604_800);

    let bond = compute_bond(&input(&market, &terms, &base, &quote, dec!(9)), at(0)).unwrap();

    assert_eq!(bond.id, 7);
    assert_eq!(bond.price.in_usd, dec!(9));
    assert_eq!(bond.price.in_base_token, dec!(9));
    assert_eq!(bond.discount, dec!(0.1));
    assert_eq!(bond.discount.to_string(), "0.100000000");
}

#[test]
fn test_discount_can_be_negative_or_zero() {
    let (base, quote) = (ohm(), dai());
    let market = base_market(1_000_000_000_000, 10_000_000_000);
    let terms = fixed_term(604_800);

    let premium = compute_bond(&input(&market, &terms, &base, &quote, dec!(11)), at(0)).unwrap();
    assert_eq!(premium.discount, dec!(-0.1));

    let at_spot = compute_bond(&input(&market, &terms, &base, &quote, dec!(10)), at(0)).unwrap();
    assert_eq!(at_spot.discount, Decimal::ZERO);
}

#[test]
fn test_discount_truncated_to_nine_places() {
    let (base, quote) = (ohm(), dai());
    let market = base_market(1_000_000_000_000, 10_000_000_000);
    let terms = fixed_term(604_800);
    let mut valuation = input(&market, &terms, &base, &quote, dec!(2));
    valuation.base_token_per_usd = dec!(3);

    let bond = compute_bond(&valuation, at(0)).unwrap();

    // (3 - 2) / 3
    assert_eq!(bond.discount, dec!(0.333333333));
    assert_eq!(bond.discount.scale(), 9);
}

#[test]
fn test_fixed_term_duration_ignores_clock() {
    let (base, quote) = (ohm(), dai());
    let market = base_market(1_000_000_000_000, 10_000_000_000);
    let terms = fixed_term(1_209_600);
    let valuation = input(&market, &terms, &base, &quote, dec!(9));

    let early = compute_bond(&valuation, at(1_000)).unwrap();
    let late = compute_bond(&valuation, at(9_000_000)).unwrap();

    assert!(early.is_fixed_term);
    assert_eq!(early.duration, dec!(1209600));
    assert_eq!(late.duration, dec!(1209600));
}

#[test]
fn test_fixed_expiration_duration_shrinks() {
    let (base, quote) = (ohm(), dai());
    let market = base_market(1_000_000_000_000, 10_000_000_000);
    let terms = Terms {
        fixed_term: false,
        vesting: 0,
        conclusion: 1_700_000_000,
    };
    let valuation = input(&market, &terms, &base, &quote, dec!(9));

    let now = at(1_699_000_000);
    let first = compute_bond(&valuation, now).unwrap();
    let later = compute_bond(&valuation, now + Duration::milliseconds(1_500)).unwrap();

    assert!(!first.is_fixed_term);
    assert_eq!(first.duration, dec!(1000000));
    assert_eq!(later.duration, dec!(999998.5));
    assert!(later.duration < first.duration);
}

#[test]
fn test_capacity_in_quote_token() {
    let base = ohm();
    let quote = QuoteToken::from(Token::new("USDC", "USD Coin", "0xusdc", 6));
    let market = RawMarket {
        capacity: 500_000_000,
        capacity_in_quote: true,
        max_payout: 10_000_000_000,
        quote_token: Address::from("0xusdc"),
    };
    let terms = fixed_term(604_800);

    let bond = compute_bond(&input(&market, &terms, &base, &quote, dec!(2)), at(0)).unwrap();

    assert_eq!(bond.capacity.in_quote_token, dec!(500));
    assert_eq!(bond.capacity.in_base_token, dec!(250));
    assert_eq!(bond.capacity.in_base_token.scale(), 9);
}

#[test]
fn test_capacity_in_base_token() {
    let (base, quote) = (ohm(), dai());
    let market = base_market(1_500_000_000_000, 10_000_000_000);
    let terms = fixed_term(604_800);

    let bond = compute_bond(&input(&market, &terms, &base, &quote, dec!(9.5)), at(0)).unwrap();

    assert_eq!(bond.capacity.in_base_token, dec!(1500));
    assert_eq!(bond.capacity.in_quote_token, dec!(14250));
    assert_eq!(bond.max_payout.in_base_token, dec!(10));
    assert_eq!(bond.max_payout.in_quote_token, dec!(95));
}

#[test]
fn test_conversion_round_trip_within_one_unit() {
    let base = ohm();
    let quote = dai();
    let rate = dec!(9.123456789);
    let terms = fixed_term(604_800);

    let in_quote = RawMarket {
        capacity: 777_777_000_000_000_000_000,
        capacity_in_quote: true,
        max_payout: 10_000_000_000,
        quote_token: Address::from("0xdai"),
    };
    let bond = compute_bond(&input(&in_quote, &terms, &base, &quote, rate), at(0)).unwrap();

    let back = bond.capacity.in_base_token * rate;
    let unit_in_quote = dec!(0.000000001) * rate;
    assert!((back - bond.capacity.in_quote_token).abs() <= unit_in_quote);
}

#[test]
fn test_base_round_trip_within_one_unit() {
    let (base, quote) = (ohm(), dai());
    let rate = dec!(9.123456789);
    let terms = fixed_term(604_800);

    let market = base_market(1_234_567_891_234, 10_000_000_000);
    let bond = compute_bond(&input(&market, &terms, &base, &quote, rate), at(0)).unwrap();

    let back = bond.capacity.in_quote_token / rate;
    assert!((back - bond.capacity.in_base_token).abs() <= dec!(0.000000001));
}

#[test]
fn test_capacity_wider_than_decimal_mantissa() {
    let (base, quote) = (ohm(), dai());
    let terms = fixed_term(604_800);

    // 100 billion DAI at 18 decimals
    let market = RawMarket {
        capacity: 100_000_000_000 * 10u128.pow(18),
        capacity_in_quote: true,
        max_payout: 10_000_000_000,
        quote_token: Address::from("0xdai"),
    };
    let bond = compute_bond(&input(&market, &terms, &base, &quote, dec!(9.5)), at(0)).unwrap();

    assert_eq!(bond.capacity.in_quote_token, dec!(100000000000));
    assert_eq!(bond.capacity.in_base_token, dec!(10526315789.473684210));
}

#[test]
fn test_sold_out_boundary() {
    let (base, quote) = (ohm(), dai());
    let terms = fixed_term(604_800);

    let exactly_one = base_market(1_000_000_000, 1_000_000_000);
    let bond = compute_bond(&input(&exactly_one, &terms, &base, &quote, dec!(9)), at(0)).unwrap();
    assert!(!bond.is_sold_out);

    let capacity_below = base_market(999_999_999, 1_000_000_000);
    let bond = compute_bond(&input(&capacity_below, &terms, &base, &quote, dec!(9)), at(0)).unwrap();
    assert!(bond.is_sold_out);

    let payout_below = base_market(5_000_000_000, 999_999_999);
    let bond = compute_bond(&input(&payout_below, &terms, &base, &quote, dec!(9)), at(0)).unwrap();
    assert!(bond.is_sold_out);
}

#[test]
fn test_sold_out_from_quote_capacity() {
    let base = ohm();
    let quote = dai();
    let terms = fixed_term(604_800);
    // 9 DAI at 10 DAI per OHM is 0.9 OHM
    let market = RawMarket {
        capacity: 9_000_000_000_000_000_000,
        capacity_in_quote: true,
        max_payout: 10_000_000_000,
        quote_token: Address::from("0xdai"),
    };

    let bond = compute_bond(&input(&market, &terms, &base, &quote, dec!(10)), at(0)).unwrap();
    assert_eq!(bond.capacity.in_base_token, dec!(0.9));
    assert!(bond.is_sold_out);
}

#[test]
fn test_idempotent() {
    let (base, quote) = (ohm(), dai());
    let market = base_market(123_456_789_012, 9_876_543_210);
    let terms = Terms {
        fixed_term: false,
        vesting: 0,
        conclusion: 2_000_000,
    };
    let valuation = input(&market, &terms, &base, &quote, dec!(9.87654321));

    let first = compute_bond(&valuation, at(1_000_000)).unwrap();
    let second = compute_bond(&valuation, at(1_000_000)).unwrap();

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_rejects_non_positive_rate() {
    let (base, quote) = (ohm(), dai());
    let market = base_market(1_000_000_000_000, 10_000_000_000);
    let terms = fixed_term(604_800);

    let result = compute_bond(&input(&market, &terms, &base, &quote, Decimal::ZERO), at(0));
    assert!(matches!(result, Err(Error::ValidationError(_))));
}
