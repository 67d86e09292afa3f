use crate::models::movie::{Genre, Movie};
use anyhow::{bail, Result};

pub const NAME_MIN_LEN: usize = 2;
pub const NAME_MAX_LEN: usize = 100;
pub const PASSWORD_MIN_LEN: usize = 6;
pub const TITLE_MIN_LEN: usize = 2;
pub const TITLE_MAX_LEN: usize = 500;

fn check_length(field: &str, value: &str, min: usize, max: usize) -> Result<()> {
    let len = value.trim().chars().count();
    if len < min || len > max {
        bail!("{} must be between {} and {} characters", field, min, max);
    }
    Ok(())
}

/// Syntactic email check: `local@domain.tld`, no whitespace.
pub fn validate_email(email: &str) -> Result<()> {
    if email.chars().any(char::is_whitespace) {
        bail!("email must not contain whitespace");
    }
    let Some((local, domain)) = email.split_once('@') else {
        bail!("email must be a valid address");
    };
    if local.is_empty() || domain.contains('@') {
        bail!("email must be a valid address");
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|l| l.is_empty()) {
        bail!("email must be a valid address");
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<()> {
    if password.chars().count() < PASSWORD_MIN_LEN {
        bail!("password must be at least {} characters", PASSWORD_MIN_LEN);
    }
    Ok(())
}

/// Every genre entry needs a name; ids must be positive.
pub fn validate_genres(genres: &[Genre]) -> Result<()> {
    for (i, genre) in genres.iter().enumerate() {
        if genre.genre_name.trim().is_empty() {
            bail!("genres[{}]: genre_name is required", i);
        }
        if genre.genre_id <= 0 {
            bail!("genres[{}]: genre_id must be positive", i);
        }
    }
    Ok(())
}

pub fn validate_registration(
    first_name: &str,
    last_name: &str,
    email: &str,
    password: &str,
    favourite_genres: &[Genre],
) -> Result<()> {
    check_length("first_name", first_name, NAME_MIN_LEN, NAME_MAX_LEN)?;
    check_length("last_name", last_name, NAME_MIN_LEN, NAME_MAX_LEN)?;
    validate_email(email)?;
    validate_password(password)?;
    validate_genres(favourite_genres)?;
    Ok(())
}

pub fn validate_login(email: &str, password: &str) -> Result<()> {
    validate_email(email)?;
    validate_password(password)
}

/// Checks a movie submitted for insertion.
pub fn validate_movie(movie: &Movie) -> Result<()> {
    if movie.imdb_id.trim().is_empty() {
        bail!("imdb_id is required");
    }
    check_length("title", &movie.title, TITLE_MIN_LEN, TITLE_MAX_LEN)?;
    if movie.poster_path.trim().is_empty() {
        bail!("poster_path is required");
    }
    if movie.youtube_id.trim().is_empty() {
        bail!("youtube_id is required");
    }
    if movie.genres.is_empty() {
        bail!("at least one genre is required");
    }
    validate_genres(&movie.genres)
}
