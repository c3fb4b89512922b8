// SPDX-FileCopyrightText: 2026 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use tabled::Tabled;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Tabled)]
pub(crate) struct SafetyTip {
    #[tabled(rename = "ID")]
    pub(crate) id: &'static str,
    #[tabled(rename = "")]
    pub(crate) icon: &'static str,
    #[tabled(rename = "Title")]
    pub(crate) title: &'static str,
    #[tabled(rename = "Category")]
    pub(crate) category: &'static str,
    #[tabled(skip)]
    pub(crate) content: &'static str,
}

static TIPS: [SafetyTip; 6] = [
    SafetyTip {
        id: "1",
        title: "Public Transport",
        icon: "🚌",
        category: "Travel",
        content: "When using public transportation, try to sit near the driver or in a populated \
                  area. Always stay alert and keep your belongings secure. If possible, share \
                  your live location with a trusted contact while traveling. Avoid empty buses \
                  or train compartments, especially at night.",
    },
    SafetyTip {
        id: "2",
        title: "Walking Alone",
        icon: "🚶‍♀️",
        category: "Outdoors",
        content: "When walking alone, especially at night, stay in well-lit and populated areas. \
                  Walk confidently and be aware of your surroundings. Avoid looking at your \
                  phone continuously as it reduces your awareness. Consider carrying a personal \
                  safety alarm and keep emergency contacts readily accessible on your phone.",
    },
    SafetyTip {
        id: "3",
        title: "Ride Sharing",
        icon: "🚗",
        category: "Travel",
        content: "Before getting into a ride-share vehicle, verify the driver's identity and car \
                  details. Share your trip details with someone you trust. Sit in the back seat \
                  when possible, and always check that the child locks aren't enabled before \
                  closing the door. Trust your instincts – if something feels wrong, don't get \
                  in the car.",
    },
    SafetyTip {
        id: "4",
        title: "Digital Safety",
        icon: "📱",
        category: "Online",
        content: "Protect your personal information online by using strong, unique passwords and \
                  enabling two-factor authentication. Be cautious about sharing your location or \
                  personal details on social media. Review your privacy settings regularly to \
                  ensure only trusted people can view your information. Be wary of unsolicited \
                  messages or friend requests from strangers.",
    },
    SafetyTip {
        id: "5",
        title: "Home Security",
        icon: "🏠",
        category: "Home",
        content: "Ensure your home has secure locks on all doors and windows. Consider installing \
                  a security system or camera. Never leave spare keys in obvious places. When \
                  arriving home, have your keys ready before reaching your door. If you live \
                  alone, consider not advertising this fact to strangers or on social media.",
    },
    SafetyTip {
        id: "6",
        title: "Self Defense",
        icon: "💪",
        category: "Personal",
        content: "Consider taking a self-defense class to build confidence and learn basic \
                  techniques. Remember that the goal of self-defense is to create an opportunity \
                  to escape to safety. Simple techniques like targeting vulnerable areas (eyes, \
                  nose, throat, groin) can be effective in creating distance between you and a \
                  threat. Practice awareness and avoidance as your first line of defense.",
    },
];

pub(crate) fn all() -> &'static [SafetyTip] {
    &TIPS
}

pub(crate) fn find(id: &str) -> Option<&'static SafetyTip> {
    TIPS.iter().find(|tip| tip.id == id)
}

pub(crate) fn in_category(category: &str) -> impl Iterator<Item = &'static SafetyTip> + '_ {
    TIPS.iter()
        .filter(move |tip| tip.category.eq_ignore_ascii_case(category))
}

/// Categories in catalog order, each listed once.
pub(crate) fn categories() -> Vec<&'static str> {
    let mut seen = Vec::new();
    for tip in &TIPS {
        if !seen.contains(&tip.category) {
            seen.push(tip.category);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        for tip in all() {
            assert_eq!(find(tip.id), Some(tip));
        }
        assert_eq!(find("7"), None);
    }

    #[test]
    fn category_lookup_ignores_case() {
        let titles: Vec<_> = in_category("travel").map(|tip| tip.title).collect();
        assert_eq!(titles, ["Public Transport", "Ride Sharing"]);
        assert_eq!(in_category("Nightlife").count(), 0);
    }

    #[test]
    fn categories_are_deduplicated_in_order() {
        assert_eq!(
            categories(),
            ["Travel", "Outdoors", "Online", "Home", "Personal"]
        );
    }
}
