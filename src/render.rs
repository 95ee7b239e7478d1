use crate::clock::{self, DayMarks};
use crate::markup::{Element, Node};
use crate::models::{RowId, ScheduledDay, Task};
use crate::session::{Popup, UiSession};
use crate::subjects::{Subject, SUBJECTS};

const STYLESHEET: &str = include_str!("../assets/style.css");

/// The whole landing page: nav, the week, and any open popups.
pub fn page(schedule: &[ScheduledDay], session: &UiSession) -> String {
    let body = Element::new("body")
        .child(nav(session))
        .child(week(schedule, session))
        .child(overlay(session))
        .child(popup_root(session));

    let mut html = String::from("<!doctype html>\n<html lang=\"en\">");
    Element::new("head")
        .child(Element::new("meta").attr("charset", "utf-8"))
        .child(
            Element::new("meta")
                .attr("name", "viewport")
                .attr("content", "width=device-width, initial-scale=1"),
        )
        .child(Element::new("title").text("Weekly Planner"))
        .child(Element::new("style").child(Node::Raw(STYLESHEET)))
        .write_html(&mut html);
    body.write_html(&mut html);
    html.push_str("</html>");
    html
}

fn nav(session: &UiSession) -> Element {
    Element::new("nav")
        .class("nav")
        .children(SUBJECTS.iter().map(|subject| {
            Element::new("a")
                .class("nav-btn")
                .attr("data-subject", subject.key)
                .attr("href", session.with(Popup::Subject(subject)).href())
                .text(subject.nav_label)
        }))
        .child(
            Element::new("a")
                .class("add-routine-btn")
                .attr("href", session.with(Popup::AddDay).href())
                .text("Add Routine"),
        )
}

fn week(schedule: &[ScheduledDay], session: &UiSession) -> Element {
    Element::new("main")
        .attr("id", "week")
        .children(schedule.iter().map(|entry| day_block(entry, session)))
}

/// One day: a labelled box followed by its task cards and an "add task"
/// link. Classes come from the date, not from the stored day name.
pub fn day_block(entry: &ScheduledDay, session: &UiSession) -> Element {
    let day = &entry.day;
    let date = clock::parse_date(&day.date);
    let marks = date.map(DayMarks::for_date).unwrap_or_default();
    let shown_date = date.map_or_else(|| day.date.clone(), clock::format_long_date);

    let day_box = Element::new("aside")
        .class("day-box")
        .class_if(marks.weekend, "weekend")
        .class_if(marks.midweek, "wednesday")
        .attr("data-day", day.day_name.as_str())
        .child(Element::new("h3").text(day.day_name.as_str()))
        .child(Element::new("p").text(shown_date));

    let task_area = Element::new("div")
        .class("task-area")
        .children(
            entry
                .tasks
                .iter()
                .map(|task| task_card(task, marks, session)),
        )
        .child(
            Element::new("a")
                .class("add-task-btn")
                .attr("href", session.with(Popup::AddTask { day_id: day.id }).href())
                .text("+"),
        );

    Element::new("section")
        .class("day-container")
        .class_if(marks.weekend, "weekend-separator")
        .class_if(marks.month_end, "monthend-separator")
        .child(day_box)
        .child(task_area)
}

pub fn task_card(task: &Task, marks: DayMarks, session: &UiSession) -> Element {
    let time_range = format!(
        "{} – {} ",
        display_time(&task.time_from),
        display_time(&task.time_to)
    );
    let duration = format!("[ {} ]", task.duration.as_deref().unwrap_or_default());

    Element::new("article")
        .class("task-card")
        .class_if(marks.weekend, "weekend")
        .class_if(marks.midweek, "wednesday")
        .child(
            Element::new("div")
                .class("time")
                .text(time_range)
                .child(Element::new("span").class("Total-time").text(duration)),
        )
        .child(Element::new("div").class("title").text(task.title.as_str()))
        .child(
            Element::new("div")
                .class("desc")
                .text(task.description.as_deref().unwrap_or_default()),
        )
        .child(delete_form(task.id, session))
}

fn display_time(raw: &str) -> String {
    clock::parse_time(raw).map_or_else(|| raw.to_owned(), clock::format_12h)
}

fn delete_form(task_id: RowId, session: &UiSession) -> Element {
    Element::new("form")
        .class("delete-task")
        .attr("method", "post")
        .attr("action", format!("/tasks/{task_id}/delete"))
        .attr("onsubmit", "return confirm('Delete this task?')")
        .child(return_to(session))
        .child(
            Element::new("button")
                .class("popup-close")
                .attr("type", "submit")
                .text("Delete"),
        )
}

fn return_to(session: &UiSession) -> Element {
    Element::new("input")
        .attr("type", "hidden")
        .attr("name", "popups")
        .attr("value", session.to_query())
}

/// Clicking the overlay closes every popup.
fn overlay(session: &UiSession) -> Element {
    Element::new("a")
        .attr("id", "overlay")
        .class("overlay")
        .class_if(!session.overlay_visible(), "hidden")
        .attr("href", "/")
        .attr(
            "aria-hidden",
            if session.overlay_visible() { "false" } else { "true" },
        )
}

fn popup_root(session: &UiSession) -> Element {
    Element::new("div").attr("id", "popup-root").children(
        session
            .popups()
            .iter()
            .enumerate()
            .map(|(index, popup)| popup_panel(*popup, index, session)),
    )
}

/// A floating panel, nudged down and right by its position in the stack.
pub fn popup_panel(popup: Popup, index: usize, session: &UiSession) -> Element {
    let remaining = session.without(index);
    let (title, body) = match popup {
        Popup::Subject(subject) => (subject.title.to_owned(), subject_body(subject)),
        Popup::AddDay => ("Add Routine".to_owned(), day_form(&remaining)),
        Popup::AddTask { day_id } => ("Add Task".to_owned(), task_form(day_id, &remaining)),
    };
    let depth = index + 1;

    Element::new("div")
        .class("popup")
        .attr(
            "style",
            format!(
                "left: calc(50% + {}px); top: calc(50% + {}px); transform: translate(-50%,-50%)",
                depth * 8,
                depth * 6
            ),
        )
        .child(
            Element::new("div")
                .class("popup-header")
                .attr("role", "dialog")
                .attr("aria-label", title.as_str())
                .child(Element::new("div").class("popup-title").text(title.as_str()))
                .child(
                    Element::new("a")
                        .class("popup-close")
                        .attr("aria-label", "Close")
                        .attr("href", remaining.href())
                        .text("✕"),
                ),
        )
        .child(body)
}

fn subject_body(subject: &Subject) -> Element {
    Element::new("div")
        .class("popup-body")
        .children(subject.chapters.iter().map(|chapter| {
            Element::new("div")
                .class("main-topic")
                .child(Element::new("div").class("main-topic-title").text(*chapter))
        }))
}

fn day_form(remaining: &UiSession) -> Element {
    form_body(
        "/days".to_owned(),
        remaining,
        &[
            ("Day Name", "day_name", "text"),
            ("Date (YYYY-MM-DD)", "date", "date"),
        ],
    )
}

fn task_form(day_id: RowId, remaining: &UiSession) -> Element {
    form_body(
        format!("/days/{day_id}/tasks"),
        remaining,
        &[
            ("From (HH:MM)", "time_from", "time"),
            ("To (HH:MM)", "time_to", "time"),
            ("Title", "title", "text"),
            ("Description", "description", "text"),
        ],
    )
}

fn form_body(
    action: String,
    remaining: &UiSession,
    fields: &[(&str, &'static str, &'static str)],
) -> Element {
    let form = Element::new("form")
        .attr("id", "popup-form")
        .attr("method", "post")
        .attr("action", action)
        .child(return_to(remaining))
        .children(fields.iter().flat_map(|(label, name, kind)| {
            [
                Node::from(
                    Element::new("label")
                        .text(format!("{label}: "))
                        .child(
                            Element::new("input")
                                .attr("type", *kind)
                                .attr("name", *name)
                                .attr("id", *name)
                                .attr("required", "required"),
                        ),
                ),
                Node::from(Element::new("br")),
            ]
        }))
        .child(
            Element::new("button")
                .attr("type", "submit")
                .text("Submit"),
        );
    Element::new("div").class("popup-body").child(form)
}
