use segview_core::geometry::Point;
use segview_core::prompt::{Click, ClickType, Modifiers, PromptAccumulator, PromptPolicy};

#[test]
fn test_default_policy_is_accumulate() {
    assert_eq!(PromptPolicy::default(), PromptPolicy::Accumulate);
    assert_eq!(PromptAccumulator::default().policy(), PromptPolicy::Accumulate);
}

#[test]
fn test_accumulate_keeps_order_and_polarity() {
    let mut acc = PromptAccumulator::new(PromptPolicy::Accumulate);
    acc.add_click(Point::new(10.0, 10.0), Modifiers::PRIMARY);
    let set = acc.add_click(Point::new(20.0, 20.0), Modifiers::SHIFT);

    assert_eq!(
        set,
        &vec![Click::positive(10.0, 10.0), Click::negative(20.0, 20.0)]
    );
}

#[test]
fn test_replace_keeps_single_point() {
    let mut acc = PromptAccumulator::new(PromptPolicy::Replace);
    acc.add_click(Point::new(10.0, 10.0), Modifiers::PRIMARY);
    let set = acc.add_click(Point::new(20.0, 20.0), Modifiers::PRIMARY);

    assert_eq!(set.len(), 1);
    assert_eq!(set[0], Click::positive(20.0, 20.0));
}

#[test]
fn test_modifiers_select_click_type() {
    assert_eq!(Modifiers::PRIMARY.click_type(), ClickType::Positive);
    assert_eq!(Modifiers::SHIFT.click_type(), ClickType::Negative);
    let right = Modifiers {
        secondary_button: true,
        shift: false,
    };
    assert_eq!(right.click_type(), ClickType::Negative);
}

#[test]
fn test_undo_and_clear() {
    let mut acc = PromptAccumulator::default();
    acc.add_click(Point::new(1.0, 2.0), Modifiers::PRIMARY);
    acc.add_click(Point::new(3.0, 4.0), Modifiers::PRIMARY);

    assert_eq!(acc.undo(), Some(Click::positive(3.0, 4.0)));
    assert_eq!(acc.prompts().len(), 1);

    acc.clear();
    assert!(acc.is_empty());
    assert_eq!(acc.undo(), None);
}

#[test]
fn test_click_type_display() {
    assert_eq!(format!("{}", ClickType::Positive), "positive");
    assert_eq!(format!("{}", ClickType::Negative), "negative");
}
