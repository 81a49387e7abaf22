//! Clinical threshold classifier.
//!
//! Each vital sign is checked against an ordered table of bands. The first
//! band whose predicate holds produces the finding; the last band of every
//! table always matches and is the normal one. Nothing here touches storage.

use crate::entities::assessment::{Assessment, Finding, Severity, VitalSign};
use crate::entities::reading::VitalSigns;

/// One row of a decision table
struct Band<I> {
    matches: fn(I) -> bool,
    severity: Severity,
    label: &'static str,
    tips: &'static [&'static str],
}

const NO_TIPS: &[&str] = &[];

const BLOOD_PRESSURE_BANDS: &[Band<(i32, i32)>] = &[
    Band {
        matches: |(s, d)| s >= 180 || d >= 120,
        severity: Severity::Critical,
        label: "🚨 HYPERTENSIVE EMERGENCY: Seek immediate medical care!",
        tips: &[
            "• Reduce sodium intake to <1,500mg/day",
            "• Follow DASH diet (fruits, vegetables, whole grains)",
            "• Engage in 30 minutes moderate exercise daily",
            "• Practice stress management techniques",
            "• Limit alcohol to 1 drink/day for women, 2 for men",
            "• Maintain healthy weight (BMI 18.5-24.9)",
        ],
    },
    Band {
        matches: |(s, d)| s >= 140 || d >= 90,
        severity: Severity::High,
        label: "⚠️ HIGH BLOOD PRESSURE (Stage 2+): Consult doctor immediately",
        tips: &[
            "• Reduce sodium intake to <2,300mg/day",
            "• Increase potassium-rich foods (bananas, spinach, sweet potatoes)",
            "• Exercise 150 minutes/week moderate intensity",
            "• Practice meditation or deep breathing",
            "• Limit processed foods and fast food",
            "• Monitor blood pressure daily",
        ],
    },
    Band {
        matches: |(s, d)| (130..140).contains(&s) || (80..90).contains(&d),
        severity: Severity::Elevated,
        label: "📈 ELEVATED BP (Stage 1): Lifestyle measures recommended",
        tips: &[
            "• Reduce sodium gradually",
            "• Increase physical activity",
            "• Eat more fruits and vegetables",
            "• Limit caffeine intake",
            "• Get adequate sleep (7-9 hours)",
            "• Consider mindfulness practices",
        ],
    },
    Band {
        matches: |(s, d)| s < 90 || d < 60,
        severity: Severity::Low,
        label: "📉 LOW BP: Consider hydration or medical review",
        tips: &[
            "• Increase fluid intake (8-10 glasses water/day)",
            "• Add more salt to diet (if not contraindicated)",
            "• Eat smaller, more frequent meals",
            "• Avoid sudden position changes",
            "• Consider compression stockings",
            "• Monitor symptoms closely",
        ],
    },
    Band {
        matches: |_| true,
        severity: Severity::Normal,
        label: "✅ Blood pressure normal - maintain healthy lifestyle!",
        tips: NO_TIPS,
    },
];

const GLUCOSE_BANDS: &[Band<f64>] = &[
    Band {
        matches: |g| g >= 300.0,
        severity: Severity::Critical,
        label: "🚨 VERY HIGH GLUCOSE: Urgent medical care needed!",
        tips: &[
            "• Follow diabetic meal plan strictly",
            "• Monitor blood glucose 4-6 times daily",
            "• Stay hydrated with water",
            "• Avoid sugary drinks and foods",
            "• Take medications as prescribed",
            "• Check for ketones if instructed",
        ],
    },
    Band {
        matches: |g| g >= 200.0,
        severity: Severity::High,
        label: "⚠️ HIGH GLUCOSE: Consult healthcare provider",
        tips: &[
            "• Follow low-carb, high-fiber diet",
            "• Exercise 30 minutes daily",
            "• Monitor carbohydrate intake",
            "• Stay well hydrated",
            "• Check blood glucose regularly",
            "• Consider medication adjustment",
        ],
    },
    Band {
        matches: |g| (140.0..200.0).contains(&g),
        severity: Severity::Elevated,
        label: "📈 IMPAIRED GLUCOSE TOLERANCE: Diet and exercise focus",
        tips: &[
            "• Choose complex carbs over simple sugars",
            "• Eat smaller portions more frequently",
            "• Include protein with each meal",
            "• Walk 10,000 steps daily",
            "• Lose weight if overweight",
            "• Limit processed foods",
        ],
    },
    Band {
        matches: |g| g < 70.0,
        severity: Severity::Low,
        label: "📉 LOW BLOOD SUGAR: Consume fast-acting carbs",
        tips: &[
            "• Eat 15g fast-acting carbs (glucose tablets, juice)",
            "• Recheck glucose in 15 minutes",
            "• Eat protein snack after correction",
            "• Don't skip meals",
            "• Carry emergency glucose source",
            "• Monitor for symptoms",
        ],
    },
    Band {
        matches: |_| true,
        severity: Severity::Normal,
        label: "✅ Glucose in normal range - keep it up!",
        tips: NO_TIPS,
    },
];

const TEMPERATURE_BANDS: &[Band<f64>] = &[
    Band {
        matches: |t| t >= 40.0,
        severity: Severity::Critical,
        label: "🚨 VERY HIGH FEVER: Seek urgent medical attention!",
        tips: &[
            "• Take fever-reducing medication as directed",
            "• Stay hydrated with cool fluids",
            "• Use cool compresses",
            "• Rest in cool environment",
            "• Monitor temperature every 2 hours",
            "• Seek medical help if symptoms worsen",
        ],
    },
    Band {
        matches: |t| t >= 38.0,
        severity: Severity::High,
        label: "🌡️ FEVER: Rest and fluids recommended",
        tips: &[
            "• Get plenty of rest",
            "• Drink fluids frequently",
            "• Use fever-reducing medication if needed",
            "• Wear light clothing",
            "• Stay in cool environment",
            "• Monitor symptoms",
        ],
    },
    Band {
        matches: |t| t < 35.0,
        severity: Severity::Low,
        label: "❄️ LOW BODY TEMPERATURE: Seek medical advice",
        tips: &[
            "• Warm up gradually",
            "• Drink warm fluids",
            "• Wear warm clothing",
            "• Avoid alcohol",
            "• Seek shelter from cold",
            "• Monitor temperature",
        ],
    },
    Band {
        matches: |_| true,
        severity: Severity::Normal,
        label: "✅ Temperature normal",
        tips: NO_TIPS,
    },
];

const OXYGEN_SATURATION_BANDS: &[Band<f64>] = &[
    Band {
        matches: |s| s < 90.0,
        severity: Severity::Critical,
        label: "🚨 LOW OXYGEN SATURATION: Urgent care required!",
        tips: &[
            "• Seek immediate medical attention",
            "• Use supplemental oxygen if prescribed",
            "• Sit upright to improve breathing",
            "• Avoid smoking and secondhand smoke",
            "• Practice deep breathing exercises",
            "• Monitor symptoms closely",
        ],
    },
    Band {
        matches: |s| (90.0..95.0).contains(&s),
        severity: Severity::Low,
        label: "⚠️ BORDERLINE OXYGEN SATURATION: Monitor symptoms",
        tips: &[
            "• Practice deep breathing exercises",
            "• Avoid smoking",
            "• Stay hydrated",
            "• Monitor for shortness of breath",
            "• Consider humidifier",
            "• Consult healthcare provider",
        ],
    },
    Band {
        matches: |_| true,
        severity: Severity::Normal,
        label: "✅ Oxygen saturation normal",
        tips: NO_TIPS,
    },
];

fn first_match<I: Copy>(bands: &'static [Band<I>], value: I) -> Option<&'static Band<I>> {
    bands.iter().find(|band| (band.matches)(value))
}

fn record<I: Copy>(
    assessment: &mut Assessment,
    vital: VitalSign,
    bands: &'static [Band<I>],
    value: Option<I>,
) {
    let Some(band) = value.and_then(|v| first_match(bands, v)) else {
        return;
    };

    assessment.findings.push(Finding {
        vital,
        severity: band.severity,
        message: band.label.to_string(),
    });
    assessment
        .lifestyle_tips
        .extend(band.tips.iter().map(|tip| tip.to_string()));
}

/// Classify one set of vital signs.
///
/// Absent measurements are skipped. Blood pressure is only evaluated when
/// both systolic and diastolic are present. Findings come out in the order
/// blood pressure, glucose, temperature, oxygen saturation.
pub fn classify(vitals: &VitalSigns) -> Assessment {
    let mut assessment = Assessment::default();

    record(
        &mut assessment,
        VitalSign::BloodPressure,
        BLOOD_PRESSURE_BANDS,
        vitals.blood_pressure(),
    );
    record(&mut assessment, VitalSign::Glucose, GLUCOSE_BANDS, vitals.glucose_mg_dl);
    record(&mut assessment, VitalSign::Temperature, TEMPERATURE_BANDS, vitals.temp_c);
    record(
        &mut assessment,
        VitalSign::OxygenSaturation,
        OXYGEN_SATURATION_BANDS,
        vitals.spo2,
    );

    assessment
}

/// The same result as [`classify`], split into the two plain string lists
pub fn suggest_for_reading(vitals: &VitalSigns) -> (Vec<String>, Vec<String>) {
    let assessment = classify(vitals);
    (assessment.assessments(), assessment.lifestyle_tips)
}
