//! Universal properties of the classifier, checked over generated landmark sets.

use glam::Vec2;
use hand_gesture::landmarks::{INDEX_TIP, MIDDLE_PIP, THUMB_MCP, THUMB_TIP};
use hand_gesture::{classify, posed_hand, ClassifierConfig, Gesture, Landmark, LANDMARK_COUNT};
use proptest::prelude::*;

fn unit_landmark() -> impl Strategy<Value = Landmark> {
    (0.0f32..=1.0, 0.0f32..=1.0).prop_map(|(x, y)| Landmark::new(x, y))
}

fn unit_hand() -> impl Strategy<Value = Vec<Landmark>> {
    prop::collection::vec(unit_landmark(), LANDMARK_COUNT)
}

proptest! {
    #[test]
    fn pinch_preempts_everything(
        mut hand in unit_hand(),
        dx in -0.034f32..0.034,
        dy in -0.034f32..0.034,
    ) {
        // |(dx, dy)| < 0.034·√2 < 0.05
        let index = hand[INDEX_TIP];
        hand[THUMB_TIP] = Landmark::new(index.x + dx, index.y + dy);
        let c = classify(&hand, &ClassifierConfig::default());
        prop_assert_eq!(c.gesture, Gesture::Pinch);
        prop_assert!(c.pinch_distance < 0.05);
    }

    #[test]
    fn position_stays_in_unit_square(hand in unit_hand()) {
        let c = classify(&hand, &ClassifierConfig::default());
        prop_assert!((-1.0..=1.0).contains(&c.position.x));
        prop_assert!((-1.0..=1.0).contains(&c.position.y));
        prop_assert!(c.pinch_distance >= 0.0);
    }

    #[test]
    fn wrong_length_always_fails_closed(len in 0usize..64) {
        prop_assume!(len != LANDMARK_COUNT);
        let hand = vec![Landmark::new(0.5, 0.5); len];
        let c = classify(&hand, &ClassifierConfig::default());
        prop_assert_eq!(c.gesture, Gesture::Open);
        prop_assert_eq!(c.pinch_distance, 0.0);
    }

    #[test]
    fn posed_hands_classify_anywhere_on_screen(
        cx in 0.15f32..0.85,
        cy in 0.15f32..0.85,
        idx in 0usize..Gesture::ALL.len(),
    ) {
        let g = Gesture::ALL[idx];
        let c = classify(&posed_hand(g, Vec2::new(cx, cy)), &ClassifierConfig::default());
        prop_assert_eq!(c.gesture, g);
    }
}

#[test]
fn curled_fist_thumb_variants() {
    let config = ClassifierConfig::default();
    let centre = Vec2::new(0.5, 0.5);

    let up = posed_hand(Gesture::ThumbsUp, centre);
    assert!(up[THUMB_TIP].y < up[THUMB_MCP].y);
    assert!(up[THUMB_TIP].y < up[MIDDLE_PIP].y);
    assert_eq!(classify(&up, &config).gesture, Gesture::ThumbsUp);

    let down = posed_hand(Gesture::ThumbsDown, centre);
    assert!(down[THUMB_TIP].y > down[THUMB_MCP].y);
    assert!(down[THUMB_TIP].y > down[MIDDLE_PIP].y + 0.05);
    assert_eq!(classify(&down, &config).gesture, Gesture::ThumbsDown);

    let fist = posed_hand(Gesture::Closed, centre);
    assert_eq!(classify(&fist, &config).gesture, Gesture::Closed);
}
