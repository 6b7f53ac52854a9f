use crate::models::{AGE_MAX, AGE_MIN};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Widget {
    Integer { min: u32, max: u32 },
    Decimal,
    Flag,
}

/// One input on the page.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub widget: Widget,
    pub column: usize,
}

const fn field(name: &'static str, label: &'static str, widget: Widget, column: usize) -> FieldSpec {
    FieldSpec {
        name,
        label,
        widget,
        column,
    }
}

pub const COLUMNS: usize = 3;

/// Page layout, column by column. This is display order, not model order.
pub static FIELDS: [FieldSpec; 20] = [
    field("age", "🔢 Age", Widget::Integer { min: AGE_MIN, max: AGE_MAX }, 1),
    field("TSH", "📊 TSH Level", Widget::Decimal, 1),
    field("FTI", "📉 FTI", Widget::Decimal, 1),
    field("TT4", "📈 TT4", Widget::Decimal, 1),
    field("T3", "🧪 T3", Widget::Decimal, 1),
    field("TSH_measured", "🩸 TSH Measured?", Widget::Flag, 1),
    field("on_thyroxine", "💊 On Thyroxine?", Widget::Flag, 1),
    field("T3_measured", "🧬 T3 Measured?", Widget::Flag, 2),
    field("sick", "🤒 Sick?", Widget::Flag, 2),
    field("T4U", "📏 T4U", Widget::Decimal, 2),
    field("TT4_measured", "📋 TT4 Measured?", Widget::Flag, 2),
    field("on_antithyroid_medication", "💉 On Antithyroid Medication?", Widget::Flag, 2),
    field("goitre", "🦠 Goitre?", Widget::Flag, 2),
    field("thyroid_surgery", "🔪 Thyroid Surgery?", Widget::Flag, 2),
    field("query_hypothyroid", "❓ Query Hypothyroid?", Widget::Flag, 3),
    field("pregnant", "🤰 Pregnant?", Widget::Flag, 3),
    field("lithium", "🧴 Lithium?", Widget::Flag, 3),
    field("psych", "🧠 Psychological Issues?", Widget::Flag, 3),
    field("T4U_measured", "📏 T4U Measured?", Widget::Flag, 3),
    field("hypopituitary", "🩺 Hypopituitary?", Widget::Flag, 3),
];

pub fn column(index: usize) -> impl Iterator<Item = &'static FieldSpec> {
    FIELDS.iter().filter(move |spec| spec.column == index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use thyroid_inferences::FEATURE_NAMES;

    #[test]
    fn every_feature_has_exactly_one_widget() {
        let names: HashSet<&str> = FIELDS.iter().map(|spec| spec.name).collect();
        let features: HashSet<&str> = FEATURE_NAMES.iter().copied().collect();
        assert_eq!(names.len(), FIELDS.len());
        assert_eq!(names, features);
    }

    #[test]
    fn three_columns() {
        let sizes: Vec<usize> = (1..=COLUMNS).map(|c| column(c).count()).collect();
        assert_eq!(sizes, vec![7, 7, 6]);
        assert_eq!(column(3).last().map(|spec| spec.name), Some("hypopituitary"));
    }

    #[test]
    fn widget_kinds() {
        let count = |kind: fn(&Widget) -> bool| FIELDS.iter().filter(|s| kind(&s.widget)).count();
        assert_eq!(count(|w| matches!(w, Widget::Integer { .. })), 1);
        assert_eq!(count(|w| *w == Widget::Decimal), 5);
        assert_eq!(count(|w| *w == Widget::Flag), 14);
    }
}
