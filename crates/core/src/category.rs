//! Category mapping tables.
//!
//! Two separate vocabularies that must not be conflated when rendering:
//! a keyword-derived free-text category assigned at ingestion from the top
//! label, and a fixed 30-entry id table used for the stored `category_id`.
//! Both are immutable lookup data.

/// Tag sentinel stored when no classification was possible.
pub const FALLBACK_TAG: &str = "未分类";
/// Category sentinel for "no keyword matched" and for classification failure.
pub const CATEGORY_OTHER: &str = "其他";
/// Category sentinel for an absent or out-of-range category id.
pub const CATEGORY_UNKNOWN: &str = "未知";

/// Keyword table in fixed priority order; first matching category wins.
static KEYWORD_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "动物",
        &[
            "bird", "cat", "dog", "fish", "shark", "tiger", "lion", "bear", "elephant", "horse",
            "zebra", "whale", "dolphin",
        ],
    ),
    ("人物", &["person", "groom", "diver", "player", "baby"]),
    (
        "风景",
        &[
            "mountain", "beach", "valley", "volcano", "cliff", "coral", "geyser", "lake", "coast",
            "lakeside", "lakeshore",
        ],
    ),
    (
        "交通工具",
        &["car", "bicycle", "airplane", "bus", "train", "ship", "motorcycle", "truck"],
    ),
    (
        "植物",
        &[
            "tree", "flower", "palm", "cactus", "mushroom", "broccoli", "cabbage", "corn", "apple",
            "orange",
        ],
    ),
    (
        "电子设备",
        &["computer", "laptop", "monitor", "keyboard", "mouse", "printer", "scanner", "camera"],
    ),
    (
        "食物",
        &["pizza", "burger", "sushi", "bread", "cake", "ice cream", "coffee", "wine", "soup"],
    ),
];

/// The fixed id vocabulary, indexed by category id 0..=29.
static ID_CATEGORIES: [&str; 30] = [
    "风景", "人物肖像", "动物", "交通工具", "食品", "建筑", "电子产品", "运动器材", "植物花卉",
    "医疗用品", "办公用品", "服装鞋帽", "家具家居", "书籍文档", "艺术创作", "工业设备", "体育赛事",
    "天文地理", "儿童玩具", "美妆个护", "军事装备", "宠物用品", "健身器材", "厨房用品",
    "实验室器材", "音乐器材", "户外装备", "珠宝首饰", "虚拟场景", "其他",
];

/// Map a raw label to the keyword vocabulary by case-insensitive substring
/// containment. Table order is the priority order.
pub fn category_from_label(label: &str) -> &'static str {
    let lowered = label.to_lowercase();
    for (category, keywords) in KEYWORD_CATEGORIES {
        if keywords.iter().any(|kw| lowered.contains(kw)) {
            return category;
        }
    }
    CATEGORY_OTHER
}

/// Map a stored category id to the id vocabulary. Absent or out-of-range
/// ids resolve to the unknown sentinel, which is distinct from id 29's
/// "other".
pub fn category_from_id(id: Option<i64>) -> &'static str {
    match id {
        Some(i) if (0..ID_CATEGORIES.len() as i64).contains(&i) => ID_CATEGORIES[i as usize],
        _ => CATEGORY_UNKNOWN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_match_is_case_insensitive() {
        assert_eq!(category_from_label("Golden Retriever Dog"), "动物");
    }

    #[test]
    fn no_keyword_match_is_other() {
        assert_eq!(category_from_label("spaceship"), CATEGORY_OTHER);
    }

    #[test]
    fn table_order_is_priority_order() {
        // "cat" (动物) appears before "car" (交通工具) keywords; a label
        // containing both maps to the earlier category.
        assert_eq!(category_from_label("cat on a car"), "动物");
    }

    #[test]
    fn id_table_bounds() {
        assert_eq!(category_from_id(Some(0)), "风景");
        assert_eq!(category_from_id(Some(29)), CATEGORY_OTHER);
        assert_eq!(category_from_id(Some(999)), CATEGORY_UNKNOWN);
        assert_eq!(category_from_id(Some(-1)), CATEGORY_UNKNOWN);
        assert_eq!(category_from_id(None), CATEGORY_UNKNOWN);
    }

    #[test]
    fn unknown_and_other_are_distinct_sentinels() {
        assert_ne!(CATEGORY_UNKNOWN, CATEGORY_OTHER);
        assert_ne!(FALLBACK_TAG, CATEGORY_OTHER);
    }
}
