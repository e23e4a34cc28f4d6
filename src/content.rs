//! Static descriptive content for each apparatus
//!
//! Titles, explanations, slider labels and quiz questions. Never mutated at
//! runtime.

/// A multiple-choice question
#[derive(Debug, Clone, Copy)]
pub struct Question {
    pub prompt: &'static str,
    pub options: &'static [&'static str],
    /// Index into `options`
    pub correct: usize,
    /// Shown after answering, right or wrong
    pub feedback: &'static str,
}

/// Text shown on an apparatus page
#[derive(Debug, Clone, Copy)]
pub struct ApparatusInfo {
    pub title: &'static str,
    pub explanation: &'static str,
    /// Label next to the slider
    pub control_label: &'static str,
    /// Slider position when the page is opened
    pub default_control: f32,
    pub questions: &'static [Question],
}

pub const SWING: ApparatusInfo = ApparatusInfo {
    title: "Swing",
    explanation: "As the swing moves up, its speed decreases and its height increases. \
        Kinetic Energy is converted to Gravitational Potential Energy. \
        At the highest point, GPE is maximum and KE is zero.",
    control_label: "Push Height",
    default_control: 50.0,
    questions: &[
        Question {
            prompt: "At which point is the Gravitational Potential Energy (GPE) highest?",
            options: &[
                "At the lowest point",
                "At the highest point of the swing",
                "In the middle of the swing",
            ],
            correct: 1,
            feedback: "GPE depends on height. The higher the object, the more GPE it has!",
        },
        Question {
            prompt: "What happens to energy as the swing moves downwards?",
            options: &[
                "GPE is converted to KE",
                "KE is converted to GPE",
                "Energy is destroyed",
            ],
            correct: 0,
            feedback: "As it moves down, it loses height (less GPE) but gains speed (more KE).",
        },
    ],
};

pub const SEESAW: ApparatusInfo = ApparatusInfo {
    title: "See-saw",
    explanation: "When one side goes up, it gains GPE. When it drops, GPE is converted to KE \
        to move the other person up. Some energy is converted to sound when the see-saw \
        hits the ground.",
    control_label: "Kid's Weight",
    default_control: 50.0,
    questions: &[Question {
        prompt: "Why does the see-saw make a 'thud' sound when it hits the ground?",
        options: &[
            "Energy is used up",
            "Some KE is converted to sound energy",
            "The see-saw lost all its energy",
        ],
        correct: 1,
        feedback: "Energy is never lost, only converted. The collision creates sound and heat.",
    }],
};

pub const SLIDE: ApparatusInfo = ApparatusInfo {
    title: "Slide",
    explanation: "At the top of the slide, you have maximum GPE. As you slide down, GPE \
        converts to KE. Friction between your clothes and the slide also converts some \
        energy into Heat.",
    control_label: "Slide Height",
    default_control: 50.0,
    questions: &[Question {
        prompt: "If the slide is made steeper, what happens at the bottom?",
        options: &["Less KE", "More KE (faster speed)", "GPE remains the same"],
        correct: 1,
        feedback: "A higher starting point means more GPE, which converts into more KE!",
    }],
};

pub const ROUNDABOUT: ApparatusInfo = ApparatusInfo {
    title: "Merry-Go-Round",
    explanation: "Your chemical potential energy (from food) is converted into kinetic energy \
        when you push the roundabout. Friction eventually converts this KE into heat, \
        causing it to slow down.",
    control_label: "Push Strength",
    default_control: 50.0,
    questions: &[Question {
        prompt: "Where did the energy to move the roundabout come from initially?",
        options: &[
            "Gravity",
            "Chemical Potential Energy from the person",
            "Elastic Potential Energy",
        ],
        correct: 1,
        feedback: "Humans use chemical potential energy stored in their bodies to move muscles.",
    }],
};

pub const CLIMBER: ApparatusInfo = ApparatusInfo {
    title: "Climbing Frame",
    explanation: "Climbing involves converting Chemical Potential Energy from your body into \
        Gravitational Potential Energy as you move higher up the frame.",
    control_label: "Climbing Speed",
    default_control: 50.0,
    questions: &[Question {
        prompt: "A boy sits still at the very top of the frame. What energy does he have?",
        options: &["Only KE", "Only GPE", "Both KE and GPE"],
        correct: 1,
        feedback: "Since he is at a height but not moving, he has GPE but no KE.",
    }],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correct_indices_in_range() {
        for info in [SWING, SEESAW, SLIDE, ROUNDABOUT, CLIMBER] {
            assert!(!info.questions.is_empty(), "{} has no questions", info.title);
            for q in info.questions {
                assert!(q.correct < q.options.len(), "bad answer key: {}", q.prompt);
            }
            assert!((0.0..=100.0).contains(&info.default_control));
        }
    }
}
