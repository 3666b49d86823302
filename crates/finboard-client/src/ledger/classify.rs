//! Keyword classifier used when an expense is entered with the `Auto`
//! category. Rules are evaluated top to bottom and the first hit wins, so the
//! order of [`RULES`] is part of the contract.

use super::types::Category;

pub const RULES: &[(&[&str], Category)] = &[
    (
        &[
            "mc", "pizza", "ifood", "burger", "comida", "restaurante", "restaurant", "grocery",
        ],
        Category::Food,
    ),
    (
        &["uber", "gasolina", "posto", "shell", "99", "metro", "taxi", "fuel"],
        Category::Transport,
    ),
    (
        &["netflix", "spotify", "steam", "cinema", "game", "prime"],
        Category::Leisure,
    ),
    (
        &["faculdade", "curso", "livro", "udemy", "alura", "course", "tuition"],
        Category::Education,
    ),
    (
        &["monitor", "mouse", "teclado", "placa", "ssd", "ram", "keyboard"],
        Category::Hardware,
    ),
    (
        &["luz", "agua", "internet", "aluguel", "electricity", "water bill"],
        Category::FixedBills,
    ),
];

pub const FALLBACK: Category = Category::Other;

pub fn classify(description: &str) -> Category {
    matching_rule(description)
        .map(|(_, category)| category)
        .unwrap_or(FALLBACK)
}

/// The first keyword hit and its category, or `None` when only the fallback
/// applies.
pub fn matching_rule(description: &str) -> Option<(&'static str, Category)> {
    let lowered = description.to_lowercase();
    RULES.iter().find_map(|(keywords, category)| {
        keywords
            .iter()
            .find(|keyword| lowered.contains(*keyword))
            .map(|keyword| (*keyword, *category))
    })
}
