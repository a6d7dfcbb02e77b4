//! Static catalog of the weight-management programs users can join.

use crate::models::ProgramType;

#[derive(Debug, Clone, Copy)]
pub struct Program {
    pub id: ProgramType,
    pub title: &'static str,
    pub description: &'static str,
    pub benefits: [&'static str; 4],
}

pub const PROGRAMS: [Program; 3] = [
    Program {
        id: ProgramType::WeightLoss,
        title: "Weight Loss Program",
        description:
            "Achieve your ideal weight with personalized meal plans and exercise routines.",
        benefits: [
            "Custom calorie deficit planning",
            "Weekly progress tracking",
            "Nutrition guidance",
            "Exercise recommendations",
        ],
    },
    Program {
        id: ProgramType::WeightGain,
        title: "Weight Gain Program",
        description:
            "Build healthy muscle mass with structured nutrition and strength training.",
        benefits: [
            "Calorie surplus strategies",
            "Muscle-building workouts",
            "Protein-rich meal plans",
            "Progress monitoring",
        ],
    },
    Program {
        id: ProgramType::Maintenance,
        title: "Weight Maintenance",
        description: "Maintain your current weight and focus on overall health and wellness.",
        benefits: [
            "Balanced nutrition plans",
            "Lifestyle habit building",
            "Energy level optimization",
            "Long-term sustainability",
        ],
    },
];
