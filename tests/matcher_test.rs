//! Tests for the match drivers

use rstest::rstest;

use semtree::{
    is_semantics_only_unordered_exact_match, is_unordered_exact_match, Dialect,
};

#[test]
fn given_identical_surface_strings_when_matching_then_true() {
    // Arrange
    let annotation =
        "(ORDER can i have (PIZZAORDER (NUMBER a ) (SIZE large ) (TOPPING bbq pulled pork ) ) please )";

    // Act / Assert
    assert!(is_unordered_exact_match(annotation, annotation, Dialect::Surface));
}

#[test]
fn given_permuted_children_when_matching_then_true() {
    // Arrange
    let string_1 = "(ORDER (PIZZAORDER (NUMBER 1) (TOPPING HAM) (SIZE LARGE)))";
    let string_2 = "(ORDER (PIZZAORDER (SIZE LARGE) (NUMBER 1) (TOPPING HAM)))";

    // Act
    let verdict = is_unordered_exact_match(string_1, string_2, Dialect::Canonical);

    // Assert
    assert!(verdict);
}

#[rstest]
#[case("(ORDER (PIZZAORDER (SIZE LARGE)))", "(ORDER (DRINKORDER (SIZE LARGE)))")]
#[case("(ORDER (PIZZAORDER (SIZE LARGE)))", "(ORDER (PIZZAORDER (SIZE SMALL)))")]
#[case(
    "(ORDER (PIZZAORDER (SIZE LARGE)))",
    "(ORDER (PIZZAORDER (SIZE LARGE) (NUMBER 1)))"
)]
fn given_diverging_trees_when_matching_then_false(#[case] string_1: &str, #[case] string_2: &str) {
    assert!(!is_unordered_exact_match(string_1, string_2, Dialect::Canonical));
}

#[rstest]
#[case("(ORDER (SIZE LARGE ) ) ) )")]
#[case("(PIZZAORDER (NOT ) )")]
#[case("(ORDER (PIZZAORDER (SIZE large )")]
fn given_malformed_side_when_matching_then_false(#[case] bad: &str) {
    // A parse failure on either side is a non-match, never an error.
    let good = "(ORDER (PIZZAORDER (SIZE large ) ) )";
    assert!(!is_unordered_exact_match(bad, good, Dialect::Surface));
    assert!(!is_unordered_exact_match(good, bad, Dialect::Surface));
}

#[test]
fn given_three_near_duplicate_children_when_matching_permutation_then_true() {
    // Three children where two are identical and one differs only in a leaf.
    // The greedy pairing claims the first unclaimed partner per child; with
    // structural equality as the base relation this permutation still
    // resolves, the search just never backtracks an earlier claim.
    let string_1 = "(ORDER (PIZZAORDER (TOPPING HAM)) (PIZZAORDER (TOPPING HAM)) \
                    (PIZZAORDER (TOPPING BACON)))";
    let string_2 = "(ORDER (PIZZAORDER (TOPPING BACON)) (PIZZAORDER (TOPPING HAM)) \
                    (PIZZAORDER (TOPPING HAM)))";

    assert!(is_unordered_exact_match(string_1, string_2, Dialect::Canonical));
    assert!(is_unordered_exact_match(string_2, string_1, Dialect::Canonical));
}

#[test]
fn given_duplicate_counts_diverge_when_matching_then_false() {
    let string_1 = "(ORDER (PIZZAORDER (TOPPING HAM)) (PIZZAORDER (TOPPING HAM)) \
                    (PIZZAORDER (TOPPING BACON)))";
    let string_2 = "(ORDER (PIZZAORDER (TOPPING HAM)) (PIZZAORDER (TOPPING BACON)) \
                    (PIZZAORDER (TOPPING BACON)))";

    assert!(!is_unordered_exact_match(string_1, string_2, Dialect::Canonical));
}

#[test]
fn given_connective_tokens_when_semantics_only_matching_then_ignored() {
    // Arrange
    let string_1 = "(ORDER hello (PIZZAORDER (SIZE large ) world ) )";
    let string_2 = "(ORDER (PIZZAORDER (SIZE large ) ) )";

    // Act
    let verdict = is_semantics_only_unordered_exact_match(string_1, string_2);

    // Assert
    assert!(verdict);
}

#[test]
fn given_diverging_semantics_when_semantics_only_matching_then_false() {
    let string_1 = "(ORDER hello (PIZZAORDER (SIZE large ) ) )";
    let string_2 = "(ORDER (PIZZAORDER (SIZE small ) ) )";

    assert!(!is_semantics_only_unordered_exact_match(string_1, string_2));
}

#[test]
fn given_malformed_side_when_semantics_only_matching_then_false() {
    let good = "(ORDER (PIZZAORDER (SIZE large ) ) )";
    let bad = "(ORDER (PIZZAORDER (SIZE large ) ) ) )";

    assert!(!is_semantics_only_unordered_exact_match(good, bad));
    assert!(!is_semantics_only_unordered_exact_match(bad, good));
}
