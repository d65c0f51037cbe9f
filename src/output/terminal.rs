// Colored terminal output for feature layouts and feature vectors.
//
// The CLI prints JSON by default; these tables are the `--table` view.
// Sentinel values are highlighted so "not computable" (NaN) and
// "not applicable" (-1) stand out from real zeros.

use colored::Colorize;

use crate::features::layout::{AccountFeature, AccountFeatureVector, PostFeature, PostFeatureVector};

/// Print the post layout's index → name table.
pub fn display_post_layout() {
    display_layout(
        "Post features",
        PostFeature::ALL.iter().map(|f| (f.index(), f.name())),
    );
}

/// Print the account layout's index → name table, marking the post-derived block.
pub fn display_account_layout() {
    display_layout(
        "Account features",
        AccountFeature::ALL.iter().map(|f| (f.index(), f.name())),
    );
    println!(
        "  {}",
        format!(
            "fields {}..{} are derived from post history",
            AccountFeature::HISTORY_START.index(),
            AccountFeature::COUNT - 1
        )
        .dimmed()
    );
}

fn display_layout<'a>(title: &str, fields: impl ExactSizeIterator<Item = (usize, &'a str)>) {
    println!(
        "\n{}",
        format!("=== {title} ({} fields) ===", fields.len()).bold()
    );
    println!();
    println!("  {:>5}  {}", "Index".dimmed(), "Name".dimmed());
    println!("  {}", "-".repeat(48).dimmed());
    for (index, name) in fields {
        println!("  {index:>5}  {name}");
    }
    println!();
}

/// Print one post's vector as a name/value table.
pub fn display_post_vector(title: &str, vector: &PostFeatureVector) {
    display_vector(title, vector.iter().map(|(f, v)| (f.name(), v)));
}

/// Print one account's vector as a name/value table.
pub fn display_account_vector(title: &str, vector: &AccountFeatureVector) {
    display_vector(title, vector.iter().map(|(f, v)| (f.name(), v)));

    let missing = vector.iter().filter(|(_, v)| v.is_nan()).count();
    if missing > 0 {
        println!("  {} {} fields not computable", "~".yellow(), missing);
        println!();
    }
}

fn display_vector<'a>(title: &str, entries: impl Iterator<Item = (&'a str, f64)>) {
    println!("\n{}", format!("=== {title} ===").bold());
    println!();
    for (name, value) in entries {
        println!("  {:<40} {}", name, colorize_value(value));
    }
    println!();
}

/// Format a feature value, dimming NaN and highlighting the -1 sentinel.
fn colorize_value(value: f64) -> colored::ColoredString {
    if value.is_nan() {
        "NaN".dimmed()
    } else if value == -1.0 {
        "-1".yellow()
    } else if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64).normal()
    } else {
        format!("{value:.4}").normal()
    }
}
