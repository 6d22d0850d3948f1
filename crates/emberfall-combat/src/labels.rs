use emberfall_core::damage_text::{DAMAGE_TEXT_FADE, DAMAGE_TEXT_RISE, DamageText};

/// Append a label, dropping the oldest entries beyond `cap`.
pub fn push_label(texts: &mut Vec<DamageText>, label: DamageText, cap: usize) {
    texts.push(label);
    trim(texts, cap);
}

fn trim(texts: &mut Vec<DamageText>, cap: usize) {
    if texts.len() > cap {
        let excess = texts.len() - cap;
        texts.drain(..excess);
    }
}

/// Fade and raise every label one tick, then prune spent ones.
pub fn age_labels(texts: &mut Vec<DamageText>, cap: usize) {
    for t in texts.iter_mut() {
        t.opacity -= DAMAGE_TEXT_FADE;
        t.offset_y -= DAMAGE_TEXT_RISE;
    }
    texts.retain(|t| t.opacity > 0.0);
    trim(texts, cap);
}
