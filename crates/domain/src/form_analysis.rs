use log::error;
use serde::Deserialize;

pub const ANALYSIS_FAILED: &str = "Unable to analyze your form.";
pub const POSSIBLE_CAUSES: &[&str] = &[
    "Poor video quality",
    "Exercise not clearly visible",
    "Network connectivity issues",
];

/// A remote pose-analysis service.
#[allow(async_fn_in_trait)]
pub trait PoseAnalyzer {
    async fn analyze(
        &self,
        exercise: &str,
        video: &VideoRef,
    ) -> Result<PoseResponse, PoseServiceError>;
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PoseServiceError {
    #[error("connection failed: {0}")]
    Connection(String),
    #[error("pose service responded with status {0}")]
    Status(u16),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Reference to a recorded video, e.g. a local path or an uploaded URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoRef(pub String);

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("Exercise name is required")]
    MissingExercise,
    #[error("Video file is required for form analysis")]
    MissingVideo,
    #[error("Unable to analyze your form.")]
    Failed,
}

impl AnalysisError {
    /// Causes shown to the user when the service could not analyze a video.
    #[must_use]
    pub fn possible_causes(&self) -> &'static [&'static str] {
        match self {
            AnalysisError::Failed => POSSIBLE_CAUSES,
            AnalysisError::MissingExercise | AnalysisError::MissingVideo => &[],
        }
    }
}

/// Raw payload of the pose-analysis service.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PoseResponse {
    pub overall_score: Option<f32>,
    pub feedback: Option<Vec<PoseFeedback>>,
    pub corrections: Option<Vec<String>>,
    pub strengths: Option<Vec<String>>,
    pub errors: Vec<PoseErrorKind>,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PoseFeedback {
    pub joint: Option<String>,
    pub issue: Option<String>,
    pub description: Option<String>,
    pub severity: Option<Severity>,
    pub timestamp: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum PoseErrorKind {
    KneeValgus,
    ForwardLean,
    InsufficientDepth,
    #[serde(other)]
    Other,
}

impl PoseErrorKind {
    #[must_use]
    pub fn tip(&self) -> Option<&'static str> {
        match self {
            PoseErrorKind::KneeValgus => Some(
                "Focus on pushing knees out in line with toes. Strengthen glutes and hip abductors.",
            ),
            PoseErrorKind::ForwardLean => {
                Some("Keep chest up and maintain neutral spine. Focus on hip hinge movement.")
            }
            PoseErrorKind::InsufficientDepth => {
                Some("Work on ankle and hip mobility. Gradually increase squat depth.")
            }
            PoseErrorKind::Other => None,
        }
    }
}

#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, strum::Display, strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Low,
    #[default]
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Finding {
    pub joint: String,
    pub issue: String,
    pub severity: Severity,
    pub timestamp: f32,
}

/// Scores of detailed biomechanical metrics.
///
/// `None` means the metric is not available yet; the service does not report
/// these values.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Biomechanics {
    pub posture: Option<u8>,
    pub stability: Option<u8>,
    pub symmetry: Option<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormAnalysis {
    pub score: u8,
    pub feedback: Vec<Finding>,
    pub corrections: Vec<String>,
    pub strengths: Vec<String>,
    pub tips: Vec<String>,
    pub biomechanics: Biomechanics,
}

impl FormAnalysis {
    /// Convert a service payload, filling in whatever the service left out.
    #[must_use]
    pub fn from_response(response: PoseResponse) -> Self {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let score = response
            .overall_score
            .filter(|s| s.is_finite())
            .map_or(0, |s| s.round().clamp(0.0, 100.0) as u8);

        let feedback = response
            .feedback
            .unwrap_or_default()
            .into_iter()
            .map(|item| Finding {
                joint: item.joint.unwrap_or_else(|| "General".to_string()),
                issue: item
                    .issue
                    .or(item.description)
                    .unwrap_or_else(|| "Form needs improvement".to_string()),
                severity: item.severity.unwrap_or_default(),
                timestamp: item.timestamp.unwrap_or_default(),
            })
            .collect::<Vec<_>>();

        let corrections = response
            .corrections
            .unwrap_or_else(|| basic_corrections(&feedback));
        let strengths = response
            .strengths
            .unwrap_or_else(|| basic_strengths(score));
        let tips = response
            .errors
            .iter()
            .filter_map(PoseErrorKind::tip)
            .map(str::to_string)
            .take(5)
            .collect();

        Self {
            score,
            feedback,
            corrections,
            strengths,
            tips,
            biomechanics: Biomechanics::default(),
        }
    }

    #[must_use]
    pub fn band(&self) -> ScoreBand {
        ScoreBand::from_score(self.score)
    }
}

/// Validate the input and analyze a recorded exercise.
pub async fn analyze_form(
    analyzer: &impl PoseAnalyzer,
    exercise: &str,
    video: &VideoRef,
) -> Result<FormAnalysis, AnalysisError> {
    if exercise.trim().is_empty() {
        return Err(AnalysisError::MissingExercise);
    }
    if video.0.trim().is_empty() {
        return Err(AnalysisError::MissingVideo);
    }

    match analyzer.analyze(exercise.trim(), video).await {
        Ok(response) => Ok(FormAnalysis::from_response(response)),
        Err(err) => {
            error!("failed to analyze form of {exercise}: {err}");
            Err(AnalysisError::Failed)
        }
    }
}

#[must_use]
pub fn basic_corrections(feedback: &[Finding]) -> Vec<String> {
    let mut corrections = vec![];

    for finding in feedback {
        let pair: [&str; 2] = match finding.joint.to_lowercase().as_str() {
            "knee" | "knees" => [
                "🎯 Keep your knees aligned with your toes during the movement",
                "📏 Maintain a 90-degree angle at the bottom of the squat",
            ],
            "back" | "spine" => [
                "🔄 Keep your back straight and core engaged",
                "📱 Avoid rounding your shoulders",
            ],
            "elbow" | "elbows" => [
                "💪 Keep elbows at a 45-degree angle from your body",
                "🎯 Lower the weight slowly with control",
            ],
            "hip" | "hips" => [
                "🔄 Initiate movement from your hips, not your knees",
                "📏 Maintain hip-width stance",
            ],
            _ => [
                "🎯 Focus on controlled, deliberate movements",
                "💨 Breathe out during the effort phase",
            ],
        };
        corrections.extend(pair.iter().map(|c| (*c).to_string()));
    }

    if corrections.is_empty() {
        corrections = vec![
            "🎯 Focus on controlled, deliberate movements".to_string(),
            "💨 Breathe out during the effort phase".to_string(),
            "📏 Maintain proper form throughout the exercise".to_string(),
        ];
    }

    corrections
}

#[must_use]
pub fn basic_strengths(score: u8) -> Vec<String> {
    let strengths: [&str; 3] = match ScoreBand::from_score(score) {
        ScoreBand::Excellent => [
            "🌟 Excellent form and technique!",
            "💪 Great stability and control",
            "🎯 Perfect exercise execution",
        ],
        ScoreBand::Good => [
            "👍 Good overall form",
            "💪 Nice stability during movement",
            "🎯 Keep practicing for perfection",
        ],
        ScoreBand::NeedsWork => [
            "🔥 Great effort and determination!",
            "💪 You're building good habits",
            "🎯 Focus on the corrections above",
        ],
    };
    strengths.iter().map(|s| (*s).to_string()).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Excellent,
    Good,
    NeedsWork,
}

impl ScoreBand {
    #[must_use]
    pub fn from_score(score: u8) -> Self {
        match score {
            80.. => ScoreBand::Excellent,
            60..80 => ScoreBand::Good,
            _ => ScoreBand::NeedsWork,
        }
    }

    #[must_use]
    pub fn color(self) -> &'static str {
        match self {
            ScoreBand::Excellent => "#4CAF50",
            ScoreBand::Good => "#FF9800",
            ScoreBand::NeedsWork => "#F44336",
        }
    }

    #[must_use]
    pub fn emoji(self) -> &'static str {
        match self {
            ScoreBand::Excellent => "🌟",
            ScoreBand::Good => "👍",
            ScoreBand::NeedsWork => "💪",
        }
    }
}

/// Letter grade of a form score.
#[must_use]
pub fn grade(score: u8) -> &'static str {
    match score {
        90.. => "A+",
        85..90 => "A",
        80..85 => "B+",
        75..80 => "B",
        70..75 => "C+",
        65..70 => "C",
        60..65 => "D+",
        55..60 => "D",
        _ => "F",
    }
}

/// Exercises offered when the service's exercise library is unavailable.
#[must_use]
pub fn default_exercise_library() -> &'static [&'static str] {
    &[
        "Barbell Squat",
        "Bench Press",
        "Deadlift",
        "Overhead Press",
        "Barbell Row",
        "Pull-ups",
        "Dips",
        "Lunges",
        "Romanian Deadlift",
        "Bicep Curls",
        "Tricep Extensions",
        "Lateral Raises",
        "Front Raises",
        "Rear Delt Flyes",
        "Calf Raises",
        "Planks",
        "Push-ups",
        "Burpees",
    ]
}

/// Test double standing in for the pose-analysis service.
///
/// Every response is a fixed mock value. It must not be used to present
/// results to users.
#[cfg(any(test, feature = "testing"))]
pub mod mock {
    use super::{PoseAnalyzer, PoseFeedback, PoseResponse, PoseServiceError, Severity, VideoRef};

    #[derive(Debug, Default)]
    pub struct MockPoseAnalyzer {
        pub fail: bool,
    }

    impl PoseAnalyzer for MockPoseAnalyzer {
        async fn analyze(
            &self,
            _: &str,
            _: &VideoRef,
        ) -> Result<PoseResponse, PoseServiceError> {
            if self.fail {
                return Err(PoseServiceError::Status(503));
            }
            Ok(PoseResponse {
                overall_score: Some(72.0),
                feedback: Some(vec![PoseFeedback {
                    joint: Some("knees".to_string()),
                    issue: Some("Knees cave in (mock)".to_string()),
                    severity: Some(Severity::High),
                    timestamp: Some(1.5),
                    ..PoseFeedback::default()
                }]),
                ..PoseResponse::default()
            })
        }
    }
}
