use std::io::{BufRead, Write};

use chrono::Local;
use sqlx::SqlitePool;

use crate::error::{AppError, AppResult};
use crate::models::entry::{EntryInput, DATE_FORMAT};
use crate::models::user::{Credentials, Session};
use crate::services::{auth, journal};

use super::chart::render_trend;
use super::prompt::Prompter;
use super::table::render_entries;

/// Interactive menus. The logged-in user lives in an explicit `Session`
/// handed down to each menu; logging out drops it.
pub struct Shell<R, W> {
    db: SqlitePool,
    io: Prompter<R, W>,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(db: SqlitePool, io: Prompter<R, W>) -> Self {
        Self { db, io }
    }

    #[cfg(test)]
    pub fn into_prompter(self) -> Prompter<R, W> {
        self.io
    }

    /// Runs until the user exits or input ends.
    pub async fn run(&mut self) -> AppResult<()> {
        match self.session_loop().await {
            Err(AppError::InputClosed) => {
                tracing::debug!("Input closed, leaving shell");
                Ok(())
            }
            other => other,
        }
    }

    async fn session_loop(&mut self) -> AppResult<()> {
        while let Some(session) = self.authenticate().await? {
            self.main_menu(&session).await?;
        }
        self.io.say("Goodbye!")
    }

    /// Shows the error to the user and carries on. Only closed input ends the
    /// session.
    fn recover<T>(&mut self, result: AppResult<T>) -> AppResult<Option<T>> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(AppError::InputClosed) => Err(AppError::InputClosed),
            Err(e) => {
                self.io.say(e.user_message())?;
                Ok(None)
            }
        }
    }

    async fn authenticate(&mut self) -> AppResult<Option<Session>> {
        loop {
            self.io.say("\n=== Welcome to Mood Tracker ===")?;
            self.io.say("1. Login")?;
            self.io.say("2. Register")?;
            self.io.say("3. Exit")?;

            match self.io.line("Enter choice: ")?.as_str() {
                "1" => {
                    let username = self.io.line("Username: ")?;
                    let password = self.io.line("Password: ")?;
                    let result = auth::login(&self.db, &Credentials::new(&username, &password)).await;
                    if let Some(session) = self.recover(result)? {
                        self.io.say(format!("Welcome back, {}!", session.username))?;
                        return Ok(Some(session));
                    }
                }
                "2" => {
                    let username = self.io.line("New Username: ")?;
                    let password = self.io.line("New Password: ")?;
                    if password.is_empty() {
                        self.io.say("Password cannot be empty.")?;
                        continue;
                    }
                    let result =
                        auth::register(&self.db, &Credentials::new(&username, &password)).await;
                    if self.recover(result)?.is_some() {
                        self.io.say("User registered successfully!")?;
                    }
                }
                "3" => return Ok(None),
                _ => self.io.say("Invalid choice.")?,
            }
        }
    }

    async fn main_menu(&mut self, session: &Session) -> AppResult<()> {
        loop {
            self.io
                .say(format!("\n=== Main Menu (User: {}) ===", session.username))?;
            self.io.say("1. Log & Manage Entries")?;
            self.io.say("2. Analytics & Reporting")?;
            self.io.say("3. Logout")?;

            match self.io.line("Enter choice: ")?.as_str() {
                "1" => self.entries_menu(session).await?,
                "2" => self.analytics_menu(session).await?,
                "3" => {
                    tracing::info!(user_id = session.user_id, "User logged out");
                    return self.io.say("👋 Logged out successfully.");
                }
                _ => self.io.say("Invalid choice.")?,
            }
        }
    }

    async fn entries_menu(&mut self, session: &Session) -> AppResult<()> {
        loop {
            self.io.say("\n=== 1. Log & Manage Entries ===")?;
            self.io.say("1. Log New Entry (C)")?;
            self.io.say("2. View All Entries (R)")?;
            self.io.say("3. Update an Entry (U)")?;
            self.io.say("4. Delete an Entry (D)")?;
            self.io.say("5. Back to Main Menu")?;

            match self.io.line("Enter choice: ")?.as_str() {
                "1" => self.log_new_entry(session).await?,
                "2" => {
                    self.view_all_entries(session).await?;
                }
                "3" => self.update_existing_entry(session).await?,
                "4" => self.delete_existing_entry(session).await?,
                "5" => return Ok(()),
                _ => self.io.say("Invalid choice.")?,
            }
        }
    }

    fn read_entry_input(&mut self, label: &str) -> AppResult<EntryInput> {
        Ok(EntryInput {
            mood: self
                .io
                .number(&format!("{label}Mood (1=Bad to 5=Great): "), Some(1), Some(5))?,
            sleep_hours: self.io.hours(&format!("{label}Sleep (Hours): "))?,
            stress_level: self.io.number(
                &format!("{label}Stress Level (1=Low to 10=High): "),
                Some(1),
                Some(10),
            )?,
            anxiety_level: self.io.number(
                &format!("{label}Anxiety Level (1=Low to 10=High): "),
                Some(1),
                Some(10),
            )?,
        })
    }

    async fn log_new_entry(&mut self, session: &Session) -> AppResult<()> {
        self.io.say("\n--- Log New Entry ---")?;
        let today = Local::now().date_naive();
        let date = self.io.date(
            &format!(
                "Date (YYYY-MM-DD, blank for today {}): ",
                today.format(DATE_FORMAT)
            ),
            today,
        )?;
        let input = self.read_entry_input("")?;

        let result = journal::log_entry(&self.db, session, date, &input).await;
        if let Some(entry) = self.recover(result)? {
            self.io.say("✅ Entry saved successfully!")?;
            self.io.say(entry.to_string())?;
        }
        Ok(())
    }

    /// Prints the table and returns whether there was anything to show.
    async fn view_all_entries(&mut self, session: &Session) -> AppResult<bool> {
        let result = journal::list_entries(&self.db, session).await;
        let Some(entries) = self.recover(result)? else {
            return Ok(false);
        };
        if entries.is_empty() {
            self.io.say("No entries logged yet.")?;
            return Ok(false);
        }
        self.io.say(render_entries(&entries))?;
        Ok(true)
    }

    async fn update_existing_entry(&mut self, session: &Session) -> AppResult<()> {
        if !self.view_all_entries(session).await? {
            return Ok(());
        }

        let entry_id: i64 = self
            .io
            .number("Enter the ID of the entry to UPDATE: ", None, None)?;
        let input = self.read_entry_input("New ")?;

        let result = journal::update_entry(&self.db, session, entry_id, &input).await;
        if let Some(entry) = self.recover(result)? {
            self.io
                .say(format!("✅ Entry ID {entry_id} updated successfully!"))?;
            self.io.say(entry.to_string())?;
        }
        Ok(())
    }

    async fn delete_existing_entry(&mut self, session: &Session) -> AppResult<()> {
        if !self.view_all_entries(session).await? {
            return Ok(());
        }

        let entry_id: i64 = self
            .io
            .number("Enter the ID of the entry to DELETE: ", None, None)?;

        let result = journal::delete_entry(&self.db, session, entry_id).await;
        if self.recover(result)?.is_some() {
            self.io
                .say(format!("🗑️ Entry ID {entry_id} deleted successfully!"))?;
        }
        Ok(())
    }

    async fn analytics_menu(&mut self, session: &Session) -> AppResult<()> {
        loop {
            self.io.say("\n=== 2. Analytics & Reporting ===")?;
            self.io.say("1. View Weekly Mood Average [Reporting]")?;
            self.io.say("2. Generate Mood/Sleep Chart [Visualization]")?;
            self.io.say("3. Predict Next Day's Mood [ML Prediction]")?;
            self.io.say("4. Back to Main Menu")?;

            match self.io.line("Enter choice: ")?.as_str() {
                "1" => {
                    let result = journal::weekly_mood_average(&self.db, session).await;
                    if let Some(avg) = self.recover(result)? {
                        self.io.say(format!(
                            "\n📈 Your average mood over the last 7 entries was: **{}/5**",
                            format_average(avg)
                        ))?;
                    }
                }
                "2" => {
                    let result = journal::prepare_trend_series(&self.db, session).await;
                    if let Some(series) = self.recover(result)? {
                        self.io.say(render_trend(&series))?;
                    }
                }
                "3" => {
                    let result = journal::predict_next_mood(&self.db, session).await;
                    if let Some(report) = self.recover(result)? {
                        self.io.say(format!("\n{report}"))?;
                    }
                }
                "4" => return Ok(()),
                _ => self.io.say("Invalid choice.")?,
            }
        }
    }
}

/// Two-decimal average as the user reads it: whole values keep one trailing
/// zero (`4.0`), others drop trailing zeros (`3.5`, `3.43`).
fn format_average(avg: f64) -> String {
    if avg.fract() == 0.0 {
        format!("{avg:.1}")
    } else {
        avg.to_string()
    }
}
