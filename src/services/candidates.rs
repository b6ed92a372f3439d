use crate::models::Candidate;
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when loading candidates
#[derive(Debug, Error)]
pub enum CandidateSourceError {
    #[error("Failed to read candidates file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid candidates JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Duplicate candidate id: {0}")]
    DuplicateId(u32),
}

/// Parse a JSON array of candidates, keeping file order
pub fn parse_candidates(json: &str) -> Result<Vec<Candidate>, CandidateSourceError> {
    let candidates: Vec<Candidate> = serde_json::from_str(json)?;

    let mut seen = HashSet::with_capacity(candidates.len());
    for candidate in &candidates {
        if !seen.insert(candidate.id) {
            return Err(CandidateSourceError::DuplicateId(candidate.id));
        }
    }

    Ok(candidates)
}

/// Load candidates from a JSON file
pub async fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Candidate>, CandidateSourceError> {
    let path = path.as_ref();
    let json = tokio::fs::read_to_string(path).await?;
    let candidates = parse_candidates(&json)?;
    tracing::info!("Loaded {} candidates from {}", candidates.len(), path.display());
    Ok(candidates)
}

/// The batch bundled with the app until match retrieval exists
pub fn demo_candidates() -> Vec<Candidate> {
    [
        (1, "Sarah", 25, "placeholder_img_boy.jpg", "Sports, Travel, Photography", "English, Spanish"),
        (2, "Emma", 28, "placeholder_img_boy.jpg", "Cooking, Reading, Yoga", "English, French"),
        (3, "Jessica", 26, "placeholder_img_girl.jpg", "Dancing, Music, Art", "English, Italian"),
        (4, "Amanda", 27, "placeholder_img_girl.jpg", "Hiking, Photography, Cooking", "English, German"),
        (5, "Rachel", 24, "placeholder_img_girl.jpg", "Fitness, Travel, Reading", "English, Portuguese"),
    ]
    .into_iter()
    .map(|(id, name, age, image, interests, languages)| Candidate {
        id,
        display_name: name.to_string(),
        age,
        image_ref: image.to_string(),
        interests_summary: interests.to_string(),
        languages_summary: languages.to_string(),
    })
    .collect()
}
