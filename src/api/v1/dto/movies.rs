/*
 * Responsibility
 * - Movies の request/response DTO
 * - release_date は YYYY-MM-DD
 */
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::repos::movie_repo::MovieRow;

#[derive(Debug, Deserialize)]
pub struct CreateMovieRequest {
    pub title: Option<String>,
    pub release_date: Option<NaiveDate>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct NewMovie {
    pub title: String,
    pub release_date: NaiveDate,
}

impl CreateMovieRequest {
    pub fn validate(self) -> Result<NewMovie, &'static str> {
        let title = self.title.ok_or("title is required")?;
        if title.trim().is_empty() {
            return Err("title is required");
        }
        let release_date = self.release_date.ok_or("release_date is required")?;

        Ok(NewMovie {
            title: title.trim().to_string(),
            release_date,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateMovieRequest {
    pub title: Option<String>,
    pub release_date: Option<NaiveDate>,
}

impl UpdateMovieRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if let Some(title) = &self.title
            && title.trim().is_empty()
        {
            return Err("title cannot be empty");
        }

        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct MovieResponse {
    pub id: i32,
    pub title: String,
    pub release_date: NaiveDate,
}

impl From<MovieRow> for MovieResponse {
    fn from(row: MovieRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            release_date: row.release_date,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MovieListResponse {
    pub success: bool,
    pub movies: Vec<MovieResponse>,
}

#[derive(Debug, Serialize)]
pub struct MovieDetailResponse {
    pub success: bool,
    pub movie: MovieResponse,
}

#[derive(Debug, Serialize)]
pub struct MovieCreatedResponse {
    pub success: bool,
    pub created: MovieResponse,
}

#[derive(Debug, Serialize)]
pub struct MovieUpdatedResponse {
    pub success: bool,
    pub updated: MovieResponse,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn release_date_is_parsed_from_iso_date() {
        let req: CreateMovieRequest =
            serde_json::from_value(json!({"title": "Cast Away", "release_date": "2000-12-22"}))
                .unwrap();

        assert_eq!(
            req.validate(),
            Ok(NewMovie {
                title: "Cast Away".to_string(),
                release_date: NaiveDate::from_ymd_opt(2000, 12, 22).unwrap(),
            })
        );
    }

    #[test]
    fn missing_fields_are_reported() {
        let no_date: CreateMovieRequest =
            serde_json::from_value(json!({"title": "Cast Away"})).unwrap();
        assert_eq!(no_date.validate(), Err("release_date is required"));

        let no_title: CreateMovieRequest =
            serde_json::from_value(json!({"release_date": "2000-12-22"})).unwrap();
        assert_eq!(no_title.validate(), Err("title is required"));
    }

    #[test]
    fn malformed_date_does_not_deserialize() {
        assert!(
            serde_json::from_value::<CreateMovieRequest>(json!({
                "title": "Cast Away", "release_date": "22/12/2000"
            }))
            .is_err()
        );
    }

    #[test]
    fn response_serializes_date_as_iso() {
        let body = serde_json::to_value(MovieResponse {
            id: 7,
            title: "Big".to_string(),
            release_date: NaiveDate::from_ymd_opt(1988, 6, 3).unwrap(),
        })
        .unwrap();
        assert_eq!(body["release_date"], json!("1988-06-03"));
    }
}
