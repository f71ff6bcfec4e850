//! Movie catalogue section of the dashboard.

use super::{dashboard::report_failure, prompt};
use crate::{
    libs::{
        messages::Message,
        movie::{Movie, MovieDraft, MovieFilter},
        store::Store,
        view::View,
    },
    msg_info, msg_success,
};
use anyhow::Result;

const ACTIONS: [Message; 7] = [
    Message::MenuList,
    Message::MenuSearch,
    Message::MenuDetails,
    Message::MenuAdd,
    Message::MenuEdit,
    Message::MenuDelete,
    Message::MenuBack,
];

pub fn menu(store: &mut Store) -> Result<()> {
    loop {
        let outcome = match prompt::menu(&ACTIONS)? {
            0 => list(store, &MovieFilter::default()),
            1 => search(store),
            2 => details(store),
            3 => add(store),
            4 => edit(store),
            5 => retire(store),
            _ => return Ok(()),
        };
        report_failure(outcome)?;
    }
}

fn list(store: &Store, filter: &MovieFilter) -> Result<()> {
    let movies = store.search_movies(filter)?;
    if movies.is_empty() {
        msg_info!(Message::NoMoviesFound);
        return Ok(());
    }
    View::movies(&movies)
}

fn search(store: &Store) -> Result<()> {
    let filter = MovieFilter {
        title: prompt::optional_text(Message::PromptTitle, None)?,
        genre: prompt::optional_text(Message::PromptGenre, None)?,
        director: prompt::optional_text(Message::PromptDirector, None)?,
        release_year: prompt::optional_number(Message::PromptReleaseYear, None)?,
        available_only: prompt::confirm(Message::PromptAvailableOnly)?,
        include_retired: prompt::confirm(Message::PromptIncludeRetired)?,
        ..MovieFilter::default()
    };
    list(store, &filter)
}

fn details(store: &Store) -> Result<()> {
    let movie = store.get_movie(prompt::id(Message::PromptMovieId)?)?;
    View::movie(&movie)
}

/// Fills a draft, offering `current` values as defaults.
fn fill_draft(store: &Store, current: &MovieDraft) -> Result<MovieDraft> {
    let genres = store.genres()?;
    if !genres.is_empty() {
        msg_info!(format!("{}: {}", Message::PromptGenre, genres.join(", ")));
    }

    Ok(MovieDraft {
        title: prompt::required_text(Message::PromptTitle, Some(&current.title).filter(|t| !t.is_empty()).map(String::as_str))?,
        director: prompt::optional_text(Message::PromptDirector, current.director.as_deref())?,
        genre: prompt::optional_text(Message::PromptGenre, current.genre.as_deref())?,
        release_year: prompt::optional_number(Message::PromptReleaseYear, current.release_year)?,
        duration_minutes: prompt::optional_number(Message::PromptDuration, current.duration_minutes)?,
        description: prompt::optional_text(Message::PromptDescription, current.description.as_deref())?,
        rental_rate: prompt::money(Message::PromptRentalRate, Some(current.rental_rate))?,
        total_copies: prompt::number(Message::PromptTotalCopies, Some(current.total_copies))?,
    })
}

fn add(store: &mut Store) -> Result<()> {
    let blank = MovieDraft {
        total_copies: 1,
        ..MovieDraft::default()
    };
    let added = prompt::until_valid(|| {
        let draft = fill_draft(store, &blank)?;
        Ok(store.add_movie(&draft)?)
    })?;

    if let Some(movie) = added {
        msg_success!(Message::MovieAdded(movie.id, movie.title));
    }
    Ok(())
}

fn edit(store: &mut Store) -> Result<()> {
    let movie: Movie = store.get_movie(prompt::id(Message::PromptMovieId)?)?;
    let current = MovieDraft::from(&movie);
    let updated = prompt::until_valid(|| {
        let draft = fill_draft(store, &current)?;
        Ok(store.update_movie(movie.id, &draft)?)
    })?;

    if let Some(movie) = updated {
        msg_success!(Message::MovieUpdated(movie.id));
    }
    Ok(())
}

fn retire(store: &mut Store) -> Result<()> {
    let movie = store.get_movie(prompt::id(Message::PromptMovieId)?)?;
    if !prompt::confirm(Message::ConfirmRetireMovie(movie.title.clone()))? {
        msg_info!(Message::OperationCancelled);
        return Ok(());
    }

    store.delete_movie(movie.id)?;
    msg_success!(Message::MovieRetired(movie.id));
    Ok(())
}
