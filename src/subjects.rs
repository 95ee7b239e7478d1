/// One subject's weekly checklist, shown in a popup from the nav bar.
#[derive(Debug, PartialEq, Eq)]
pub struct Subject {
    /// Stable key used in nav links and the popup query string.
    pub key: &'static str,
    pub nav_label: &'static str,
    pub title: &'static str,
    pub chapters: &'static [&'static str],
}

pub static SUBJECTS: &[Subject] = &[
    Subject {
        key: "Physics",
        nav_label: "Phy",
        title: "Physics — Weekly Checklist",
        chapters: &[
            "Ch-1: Unit & Measurement",
            "Ch-2: Motion in Straight Line",
            "Ch-3: Motion in Plane",
            "Ch-4: Laws of Motion",
            "Ch-5: Work, Energy and Power",
        ],
    },
    Subject {
        key: "Chemistry",
        nav_label: "Chem",
        title: "Chemistry — Weekly Checklist",
        chapters: &[
            "Ch-1: Some Basic Concept",
            "Ch-2: Structure of Atom",
            "Ch-3: Classification of Elements",
            "Ch-4: Chemical Bonding",
            "Ch-5: Thermodynamics",
        ],
    },
    Subject {
        key: "Mathematics",
        nav_label: "Math",
        title: "Mathematics — Weekly Checklist",
        chapters: &[
            "Ch-1: Sets",
            "Ch-2: Relations & Functions",
            "Ch-3: Trigonometric Equations",
            "Ch-4: Complex Numbers",
            "Ch-5: Linear Inequalities",
            "Ch-6: Permutations & Combinations",
        ],
    },
    Subject {
        key: "CS",
        nav_label: "CS",
        title: "Computer Science — Weekly Checklist",
        chapters: &[
            "Ch-1: Computer System",
            "Ch-2: Data Representation",
            "Ch-3: Boolean Logic",
            "Ch-4: Problem Solving",
        ],
    },
    Subject {
        key: "English",
        nav_label: "Eng",
        title: "English — Weekly Checklist",
        chapters: &[
            "Ch-1: The Portrait of a Lady",
            "Ch-2: A Photograph",
            "Ch-3: We’re Not Afraid to Die…",
            "Ch-4: Discovering Tut",
            "Ch-5: The Laburnum Top",
            "Ch-6: The Ailing Planet",
            "Ch-7: The Summer of the Beautiful White Horse",
            "Ch-8: The Address",
            "Ch-9: Mother’s Day",
            "Ch-10: Birth",
        ],
    },
];

pub fn find(key: &str) -> Option<&'static Subject> {
    SUBJECTS.iter().find(|subject| subject.key == key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_unique_and_findable() {
        for subject in SUBJECTS {
            assert_eq!(find(subject.key), Some(subject));
            assert!(!subject.chapters.is_empty());
        }
        assert_eq!(find("physics"), None);
    }
}
