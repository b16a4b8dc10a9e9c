// src/gui/components/mod.rs
pub mod charts;
pub mod controls;
pub mod data_table;
pub mod export_bar;
pub mod metrics;
pub mod tabs;

/// "2100000" → "2,100,000"
pub(crate) fn fmt_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
