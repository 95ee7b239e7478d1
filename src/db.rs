use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::models::{Day, NewDay, NewTask, RowId, ScheduledDay, Task, TaskFields};

const TASK_COLUMNS: &str = "id, day_id, time_from, time_to, title, description, duration";

pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn connect<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let conn = Connection::open(path.as_ref())
            .with_context(|| format!("opening database at {}", path.as_ref().display()))?;
        // Cascading deletes depend on this; SQLite leaves it off per connection.
        conn.pragma_update(None, "foreign_keys", true)
            .context("enabling foreign keys")?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> anyhow::Result<()> {
        self.conn
            .execute_batch(
                r#"
            CREATE TABLE IF NOT EXISTS days (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                day_name TEXT NOT NULL,
                date TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS tasks (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                day_id INTEGER NOT NULL REFERENCES days(id) ON DELETE CASCADE,
                time_from TEXT NOT NULL,
                time_to TEXT NOT NULL,
                title TEXT NOT NULL,
                description TEXT,
                duration TEXT
            );
            CREATE INDEX IF NOT EXISTS tasks_day_id ON tasks (day_id);
            "#,
            )
            .context("creating schedule tables")?;
        Ok(())
    }

    /// Every day ordered by date, each carrying its tasks ordered by start
    /// time.
    pub fn list_schedule(&self) -> anyhow::Result<Vec<ScheduledDay>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, day_name, date FROM days ORDER BY date ASC, id ASC")?;
        let days = stmt
            .query_map([], day_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        let mut stmt = self.conn.prepare(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks ORDER BY time_from ASC, id ASC"
        ))?;
        let mut tasks_by_day: HashMap<RowId, Vec<Task>> = HashMap::new();
        for task in stmt.query_map([], task_from_row)? {
            let task = task?;
            tasks_by_day.entry(task.day_id).or_default().push(task);
        }

        Ok(days
            .into_iter()
            .map(|day| ScheduledDay {
                tasks: tasks_by_day.remove(&day.id).unwrap_or_default(),
                day,
            })
            .collect())
    }

    pub fn add_day(&self, new: &NewDay) -> anyhow::Result<Day> {
        self.conn.execute(
            "INSERT INTO days (day_name, date) VALUES (?1, ?2)",
            params![new.day_name, new.date],
        )?;
        Ok(Day {
            id: self.conn.last_insert_rowid(),
            day_name: new.day_name.clone(),
            date: new.date.clone(),
        })
    }

    /// Returns `None` when no day has this id.
    pub fn update_day(&self, id: RowId, changes: &NewDay) -> anyhow::Result<Option<Day>> {
        let updated = self.conn.execute(
            "UPDATE days SET day_name = ?1, date = ?2 WHERE id = ?3",
            params![changes.day_name, changes.date, id],
        )?;
        if updated == 0 {
            return Ok(None);
        }
        Ok(Some(Day {
            id,
            day_name: changes.day_name.clone(),
            date: changes.date.clone(),
        }))
    }

    /// Deletes the day and, through the foreign key, its tasks. Returns
    /// whether a day was removed.
    pub fn delete_day(&self, id: RowId) -> anyhow::Result<bool> {
        let deleted = self
            .conn
            .execute("DELETE FROM days WHERE id = ?1", params![id])?;
        Ok(deleted > 0)
    }

    pub fn add_task(&self, new: &NewTask) -> anyhow::Result<Task> {
        let fields = &new.fields;
        self.conn
            .execute(
                "INSERT INTO tasks (day_id, time_from, time_to, title, description, duration) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    new.day_id,
                    fields.time_from,
                    fields.time_to,
                    fields.title,
                    fields.description,
                    fields.duration
                ],
            )
            .with_context(|| format!("inserting task for day {}", new.day_id))?;
        Ok(Task {
            id: self.conn.last_insert_rowid(),
            day_id: new.day_id,
            time_from: fields.time_from.clone(),
            time_to: fields.time_to.clone(),
            title: fields.title.clone(),
            description: fields.description.clone(),
            duration: fields.duration.clone(),
        })
    }

    /// Overwrites every editable field. `duration` is taken as given, never
    /// recomputed from the new times. Returns `None` when no task has this id.
    pub fn update_task(&self, id: RowId, changes: &TaskFields) -> anyhow::Result<Option<Task>> {
        let updated = self.conn.execute(
            "UPDATE tasks SET time_from = ?1, time_to = ?2, title = ?3, description = ?4, \
             duration = ?5 WHERE id = ?6",
            params![
                changes.time_from,
                changes.time_to,
                changes.title,
                changes.description,
                changes.duration,
                id
            ],
        )?;
        if updated == 0 {
            return Ok(None);
        }
        self.find_task(id)
    }

    pub fn find_task(&self, id: RowId) -> anyhow::Result<Option<Task>> {
        let task = self
            .conn
            .query_row(
                &format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1"),
                params![id],
                task_from_row,
            )
            .optional()?;
        Ok(task)
    }

    /// Returns whether a task was removed.
    pub fn delete_task(&self, id: RowId) -> anyhow::Result<bool> {
        let deleted = self
            .conn
            .execute("DELETE FROM tasks WHERE id = ?1", params![id])?;
        Ok(deleted > 0)
    }
}

fn day_from_row(row: &Row<'_>) -> rusqlite::Result<Day> {
    Ok(Day {
        id: row.get(0)?,
        day_name: row.get(1)?,
        date: row.get(2)?,
    })
}

fn task_from_row(row: &Row<'_>) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        day_id: row.get(1)?,
        time_from: row.get(2)?,
        time_to: row.get(3)?,
        title: row.get(4)?,
        description: row.get(5)?,
        duration: row.get(6)?,
    })
}
