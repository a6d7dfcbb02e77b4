use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

/// One entry of the mock scan result table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanCondition {
    pub condition: &'static str,
    pub confidence: u8,
    pub tips: [&'static str; 5],
}

pub static CONDITIONS: [ScanCondition; 5] = [
    ScanCondition {
        condition: "Healthy Skin",
        confidence: 92,
        tips: [
            "Maintain your current skincare routine",
            "Use sunscreen daily with at least SPF 30",
            "Stay hydrated by drinking 8 glasses of water daily",
            "Get 7-9 hours of quality sleep each night",
            "Eat a balanced diet rich in vitamins and antioxidants",
        ],
    },
    ScanCondition {
        condition: "Mild Acne",
        confidence: 85,
        tips: [
            "Wash your face twice daily with a gentle cleanser",
            "Avoid touching your face frequently",
            "Use non-comedogenic skincare products",
            "Consider using products with salicylic acid or benzoyl peroxide",
            "Consult a dermatologist if condition persists",
        ],
    },
    ScanCondition {
        condition: "Dry Skin",
        confidence: 88,
        tips: [
            "Use a rich moisturizer twice daily",
            "Avoid hot showers and use lukewarm water",
            "Use a humidifier in dry environments",
            "Drink plenty of water throughout the day",
            "Choose gentle, fragrance-free skincare products",
        ],
    },
    ScanCondition {
        condition: "Sun Damage",
        confidence: 79,
        tips: [
            "Always wear broad-spectrum sunscreen SPF 30+",
            "Seek shade during peak sun hours (10am-4pm)",
            "Wear protective clothing and a wide-brimmed hat",
            "Use vitamin C serum to help repair damage",
            "Schedule a dermatology appointment for evaluation",
        ],
    },
    ScanCondition {
        condition: "Normal Variation",
        confidence: 90,
        tips: [
            "Continue with regular health maintenance",
            "Stay active with at least 30 minutes of exercise daily",
            "Eat a balanced diet with plenty of fruits and vegetables",
            "Get regular check-ups with your healthcare provider",
            "Practice good hygiene and self-care habits",
        ],
    },
];

/// Returns a random table entry. The image content is never inspected.
pub fn analyze<R: Rng + ?Sized>(rng: &mut R) -> &'static ScanCondition {
    CONDITIONS.choose(rng).unwrap_or(&CONDITIONS[0])
}
