use std::sync::LazyLock;

use rand::seq::SliceRandom;
use rand::Rng;
use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Greeting,
    Exercise,
    Nutrition,
    Sleep,
    Stress,
    Hydration,
    General,
}

/// Keyword patterns tested in priority order. The first match wins.
/// Word boundaries are ASCII-only, so accented letters never count as part
/// of a keyword's word.
static TOPIC_PATTERNS: LazyLock<Vec<(Topic, Regex)>> = LazyLock::new(|| {
    [
        (Topic::Greeting, r"(?-u:\b)(hi|hello|hey|greetings)(?-u:\b)"),
        (
            Topic::Exercise,
            r"(?-u:\b)(exercise|workout|fitness|gym|activity|physical)(?-u:\b)",
        ),
        (
            Topic::Nutrition,
            r"(?-u:\b)(food|eat|diet|nutrition|meal|vitamin|nutrient)(?-u:\b)",
        ),
        (Topic::Sleep, r"(?-u:\b)(sleep|rest|tired|insomnia|sleeping)(?-u:\b)"),
        (Topic::Stress, r"(?-u:\b)(stress|anxiety|worried|nervous|pressure)(?-u:\b)"),
        (
            Topic::Hydration,
            r"(?-u:\b)(water|hydration|drink|hydrated|thirsty)(?-u:\b)",
        ),
    ]
    .into_iter()
    .map(|(topic, pattern)| {
        (
            topic,
            Regex::new(pattern).expect("topic regex should compile"),
        )
    })
    .collect()
});

const GREETING: &[&str] = &[
    "Hello! I'm here to help with your health questions. What would you like to know?",
    "Hi there! How can I assist you with your health journey today?",
    "Welcome! I'm your AI health assistant. What can I help you with?",
];

const EXERCISE: &[&str] = &[
    "Regular exercise is crucial for maintaining good health. I recommend starting with 30 minutes of moderate activity most days of the week. This could include brisk walking, swimming, or cycling. Always consult your doctor before starting a new exercise program.",
    "Exercise benefits include improved cardiovascular health, stronger bones and muscles, better mental health, and weight management. Try to incorporate both aerobic activities and strength training into your routine.",
];

const NUTRITION: &[&str] = &[
    "A balanced diet should include plenty of fruits, vegetables, whole grains, lean proteins, and healthy fats. Try to limit processed foods, added sugars, and excessive sodium. Remember, variety is key to getting all the nutrients your body needs.",
    "Good nutrition is foundational to health. Focus on eating colorful fruits and vegetables, choosing whole grains over refined ones, and including lean proteins like fish, poultry, beans, and nuts in your meals.",
];

const SLEEP: &[&str] = &[
    "Most adults need 7-9 hours of quality sleep per night. To improve sleep quality, maintain a consistent sleep schedule, create a relaxing bedtime routine, keep your bedroom cool and dark, and avoid screens before bed.",
    "Sleep is essential for physical and mental health. Poor sleep can affect your mood, concentration, immune system, and overall well-being. If you're having persistent sleep problems, consider speaking with a healthcare provider.",
];

const STRESS: &[&str] = &[
    "Managing stress is important for overall health. Try techniques like deep breathing, meditation, regular exercise, spending time in nature, and maintaining social connections. Don't hesitate to seek professional help if stress becomes overwhelming.",
    "Chronic stress can impact your physical and mental health. Practice stress-management techniques daily, such as mindfulness, yoga, journaling, or talking with friends. Remember, it's okay to ask for help when you need it.",
];

const HYDRATION: &[&str] = &[
    "Staying hydrated is vital for your health. Aim for about 8 glasses of water daily, though needs vary based on activity level, climate, and individual factors. Signs of good hydration include clear or light-colored urine and feeling energized.",
    "Water is essential for nearly every bodily function. It helps regulate body temperature, transport nutrients, remove waste, and maintain energy levels. Carry a water bottle with you as a reminder to drink throughout the day.",
];

const GENERAL: &[&str] = &[
    "That's a great health question! While I can provide general information, remember that everyone's health needs are unique. For personalized advice, it's always best to consult with a healthcare professional who knows your medical history.",
    "I'm here to provide general health information and guidance. For specific medical concerns or conditions, please consult with a qualified healthcare provider who can give you personalized advice.",
    "Health is multifaceted and includes physical, mental, and emotional well-being. A healthy lifestyle typically involves balanced nutrition, regular exercise, adequate sleep, stress management, and regular check-ups with healthcare providers.",
];

impl Topic {
    pub fn responses(self) -> &'static [&'static str] {
        match self {
            Topic::Greeting => GREETING,
            Topic::Exercise => EXERCISE,
            Topic::Nutrition => NUTRITION,
            Topic::Sleep => SLEEP,
            Topic::Stress => STRESS,
            Topic::Hydration => HYDRATION,
            Topic::General => GENERAL,
        }
    }
}

pub fn classify(message: &str) -> Topic {
    let lower = message.to_lowercase();
    TOPIC_PATTERNS
        .iter()
        .find(|(_, pattern)| pattern.is_match(&lower))
        .map(|(topic, _)| *topic)
        .unwrap_or(Topic::General)
}

/// Pick a canned reply for `message` from its topic bucket.
pub fn reply<R: Rng + ?Sized>(message: &str, rng: &mut R) -> &'static str {
    let bucket = classify(message).responses();
    // Buckets are non-empty constants.
    bucket.choose(rng).copied().unwrap_or(GENERAL[0])
}
