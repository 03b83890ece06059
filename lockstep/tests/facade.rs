use lockstep::{Options, Sameness, assert_same, check_same, differences, reflect};
use lockstep_testhelpers::test;

struct Account {
    owner: String,
    balance: i64,
}
reflect!(Account { owner, balance });

#[test]
fn everything_is_reachable_from_the_root() {
    let a = Account {
        owner: "ada".into(),
        balance: 10,
    };
    let b = Account {
        owner: "ada".into(),
        balance: 12,
    };
    assert_eq!(
        differences(&a, &b, &Options::new()),
        ["Account.balance: 10 != 12\n"]
    );
    assert!(matches!(check_same(&a, &b), Sameness::Different(_)));
    assert_same!(a, a);

    let v = lockstep::reflect(&a);
    assert_eq!(
        lockstep::pretty::format_short(&v, true),
        r#"Account { owner: "ada", balance: 10 }"#
    );
    assert_eq!(
        lockstep::diff_core::edit_script_slices(&[1, 2], &[1]).len(),
        1
    );
}

#[cfg(feature = "num-complex")]
#[test]
fn complex_numbers_reflect_through_the_default_feature() {
    use num_complex::Complex;

    let a = vec![Complex::new(1.0, 2.0)];
    let b = vec![Complex::new(1.0, -3.0)];
    assert_eq!(
        differences(&a, &b, &Options::new()),
        ["Vec<Complex<f64>>[0]: 1.0+2.0i != 1.0-3.0i\n"]
    );
}
