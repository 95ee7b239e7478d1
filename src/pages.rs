//! The server-rendered planner page and the plain HTML forms that drive it.
//! Every form post ends in a redirect back to the page, so the browser always
//! reloads the full schedule afterwards.

use axum::extract::rejection::{FormRejection, QueryRejection};
use axum::extract::{Form, Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::Deserialize;

use crate::clock;
use crate::db::Database;
use crate::models::{Day, NewDay, NewTask, RowId, Task, TaskFields};
use crate::render;
use crate::session::{SessionQuery, UiSession};
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/days", post(add_day))
        .route("/days/:id/tasks", post(add_task))
        .route("/tasks/:id/delete", post(delete_task))
}

#[derive(Debug, Deserialize)]
pub struct DayForm {
    day_name: String,
    date: String,
    #[serde(default)]
    popups: String,
}

#[derive(Debug, Deserialize)]
pub struct TaskForm {
    time_from: String,
    time_to: String,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    popups: String,
}

#[derive(Debug, Deserialize)]
pub struct ReturnForm {
    #[serde(default)]
    popups: String,
}

/// A query that does not decode (e.g. `popups` given twice) renders the page
/// with every popup closed.
async fn index(
    State(state): State<AppState>,
    query: Result<Query<SessionQuery>, QueryRejection>,
) -> Html<String> {
    let session = match query {
        Ok(Query(query)) => UiSession::from_query(&query.popups),
        Err(rejection) => {
            tracing::warn!("page query: {}", rejection.body_text());
            UiSession::default()
        }
    };
    let schedule = match Database::connect(&state.db_path).and_then(|db| db.list_schedule()) {
        Ok(schedule) => schedule,
        Err(err) => {
            tracing::error!("loading schedule: {err:#}");
            Vec::new()
        }
    };
    Html(render::page(&schedule, &session))
}

async fn add_day(
    State(state): State<AppState>,
    form: Result<Form<DayForm>, FormRejection>,
) -> Response {
    let Form(form) = match form {
        Ok(form) => form,
        Err(rejection) => {
            tracing::warn!("day form: {}", rejection.body_text());
            return redirect_to("");
        }
    };
    match store_day(&state, &form) {
        Ok(day) => tracing::info!(id = day.id, date = %day.date, "day added from form"),
        Err(err) => tracing::warn!("adding day: {err:#}"),
    }
    redirect_to(&form.popups)
}

async fn add_task(
    State(state): State<AppState>,
    Path(day_id): Path<RowId>,
    form: Result<Form<TaskForm>, FormRejection>,
) -> Response {
    let Form(form) = match form {
        Ok(form) => form,
        Err(rejection) => {
            tracing::warn!(day_id, "task form: {}", rejection.body_text());
            return redirect_to("");
        }
    };
    match store_task(&state, day_id, &form) {
        Ok(task) => tracing::info!(id = task.id, day_id, "task added from form"),
        Err(err) => tracing::warn!(day_id, "adding task: {err:#}"),
    }
    redirect_to(&form.popups)
}

/// Reloads whether or not the delete went through.
async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<RowId>,
    Form(form): Form<ReturnForm>,
) -> Response {
    match Database::connect(&state.db_path).and_then(|db| db.delete_task(id)) {
        Ok(true) => tracing::info!(id, "task deleted from form"),
        Ok(false) => tracing::warn!(id, "task to delete was already gone"),
        Err(err) => tracing::warn!(id, "deleting task: {err:#}"),
    }
    redirect_to(&form.popups)
}

fn store_day(state: &AppState, form: &DayForm) -> anyhow::Result<Day> {
    let new = NewDay {
        day_name: form.day_name.clone(),
        date: form.date.clone(),
    };
    new.validate()?;
    Database::connect(&state.db_path)?.add_day(&new)
}

fn store_task(state: &AppState, day_id: RowId, form: &TaskForm) -> anyhow::Result<Task> {
    let new = NewTask {
        day_id,
        fields: TaskFields {
            time_from: form.time_from.clone(),
            time_to: form.time_to.clone(),
            title: form.title.clone(),
            description: Some(form.description.clone()),
            duration: form_duration(&form.time_from, &form.time_to),
        },
    };
    new.fields.validate()?;
    Database::connect(&state.db_path)?.add_task(&new)
}

/// Computed once here and stored as text; later edits to the times leave it
/// alone.
fn form_duration(time_from: &str, time_to: &str) -> Option<String> {
    let from = clock::parse_time(time_from)?;
    let to = clock::parse_time(time_to)?;
    Some(clock::duration_label(from, to))
}

/// Back to the page with the popups that should stay open. Re-parsing keeps
/// the location on this site whatever the form sent.
fn redirect_to(popups: &str) -> Response {
    let location = UiSession::from_query(popups).href();
    (StatusCode::SEE_OTHER, [(header::LOCATION, location)]).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::extract::FromRequest;
    use axum::http::{Request, Uri};
    use tempfile::{tempdir, TempDir};

    fn setup() -> (AppState, TempDir) {
        let dir = tempdir().unwrap();
        let state = AppState {
            db_path: dir.path().join("schedule.db"),
        };
        (state, dir)
    }

    fn seed_day(state: &AppState, date: &str) -> Day {
        Database::connect(&state.db_path)
            .unwrap()
            .add_day(&NewDay {
                day_name: "Sunday".into(),
                date: date.into(),
            })
            .unwrap()
    }

    fn task_form(time_from: &str, time_to: &str) -> TaskForm {
        TaskForm {
            time_from: time_from.into(),
            time_to: time_to.into(),
            title: "Physics".into(),
            description: "Ch-4".into(),
            popups: "CS,task-1".into(),
        }
    }

    fn location(response: &Response) -> &str {
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        response
            .headers()
            .get(header::LOCATION)
            .unwrap()
            .to_str()
            .unwrap()
    }

    fn tasks(state: &AppState) -> Vec<Task> {
        Database::connect(&state.db_path)
            .unwrap()
            .list_schedule()
            .unwrap()
            .into_iter()
            .flat_map(|entry| entry.tasks)
            .collect()
    }

    #[test]
    fn form_duration_matches_planner_format() {
        assert_eq!(form_duration("09:00", "11:00").as_deref(), Some("2h"));
        assert_eq!(form_duration("11:00", "09:00").as_deref(), Some("-2h"));
        assert_eq!(form_duration("09:00", "soon"), None);
    }

    #[tokio::test]
    async fn task_form_stores_computed_duration() {
        let (state, _dir) = setup();
        let day = seed_day(&state, "2024-03-31");

        let response = add_task(State(state.clone()), Path(day.id), Ok(Form(task_form("09:00", "11:00")))).await;
        assert_eq!(location(&response), "/?popups=CS,task-1");

        let stored = tasks(&state);
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].duration.as_deref(), Some("2h"));
        assert_eq!(stored[0].description.as_deref(), Some("Ch-4"));
    }

    #[tokio::test]
    async fn reversed_times_are_accepted_with_negative_duration() {
        let (state, _dir) = setup();
        let day = seed_day(&state, "2024-03-31");

        add_task(State(state.clone()), Path(day.id), Ok(Form(task_form("11:00", "09:00")))).await;
        assert_eq!(tasks(&state)[0].duration.as_deref(), Some("-2h"));
    }

    #[tokio::test]
    async fn day_form_redirects_even_when_invalid() {
        let (state, _dir) = setup();
        let form = DayForm {
            day_name: "Monday".into(),
            date: "not a date".into(),
            popups: "nonsense,day".into(),
        };
        let response = add_day(State(state.clone()), Ok(Form(form))).await;
        assert_eq!(location(&response), "/?popups=day");
        assert!(Database::connect(&state.db_path).unwrap().list_schedule().unwrap().is_empty());
    }

    #[tokio::test]
    async fn deleting_a_missing_task_still_reloads() {
        let (state, _dir) = setup();
        let form = ReturnForm {
            popups: String::new(),
        };
        let response = delete_task(State(state.clone()), Path(404), Form(form)).await;
        assert_eq!(location(&response), "/");
    }

    #[tokio::test]
    async fn index_renders_stored_days() {
        let (state, _dir) = setup();
        seed_day(&state, "2024-03-31");

        let Html(body) = index(
            State(state.clone()),
            Ok(Query(SessionQuery {
                popups: "Physics".into(),
            })),
        )
        .await;
        assert!(body.contains("31 March 2024"));
        assert!(body.contains("monthend-separator"));
        assert!(body.contains("Physics — Weekly Checklist"));
    }

    #[tokio::test]
    async fn unreachable_store_renders_an_empty_week() {
        let dir = tempdir().unwrap();
        // A directory cannot be opened as a database file.
        let state = AppState {
            db_path: dir.path().to_path_buf(),
        };
        let Html(body) = index(State(state), Ok(Query(SessionQuery::default()))).await;
        assert!(body.contains("<main id=\"week\"></main>"));
    }

    async fn post_form<T>(body: &'static str) -> Result<Form<T>, FormRejection>
    where
        T: serde::de::DeserializeOwned,
    {
        let request = Request::post("/")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap();
        Form::<T>::from_request(request, &()).await
    }

    #[tokio::test]
    async fn repeated_popups_parameter_renders_with_popups_closed() {
        let (state, _dir) = setup();
        let uri: Uri = "/?popups=Physics&popups=CS".parse().unwrap();
        let query = Query::<SessionQuery>::try_from_uri(&uri);
        assert!(query.is_err());

        let Html(body) = index(State(state), query).await;
        assert!(body.contains("<main id=\"week\"></main>"));
        assert!(!body.contains("Physics — Weekly Checklist"));
    }

    #[tokio::test]
    async fn incomplete_forms_still_reload() {
        let (state, _dir) = setup();
        let day = seed_day(&state, "2024-03-31");

        let form = post_form::<DayForm>("day_name=Monday&popups=day").await;
        assert!(form.is_err());
        let response = add_day(State(state.clone()), form).await;
        assert_eq!(location(&response), "/");

        let form = post_form::<TaskForm>("time_from=09%3A00&title=Physics").await;
        assert!(form.is_err());
        let response = add_task(State(state.clone()), Path(day.id), form).await;
        assert_eq!(location(&response), "/");

        assert!(tasks(&state).is_empty());
        let days = Database::connect(&state.db_path).unwrap().list_schedule().unwrap();
        assert_eq!(days.len(), 1);
    }
}
