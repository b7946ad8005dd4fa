//! In-memory `Repository` with the same semantics as `PgRepository`,
//! so the whole router can be driven without a database.

#![allow(dead_code)]

use std::cmp::Ordering;
use std::sync::{Arc, Mutex, MutexGuard};

use actix_web::{test::TestRequest, web};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;

use time_tracker::db::Repository;
use time_tracker::error::{AppError, AppResult};
use time_tracker::models::task::{NewTask, Task, TaskQuery};
use time_tracker::models::user::{NewUser, User, UserChanges, UserQuery};

#[derive(Default)]
struct State {
    users: Vec<User>,
    tasks: Vec<Task>,
    last_user_id: i32,
    last_task_id: i32,
}

#[derive(Default)]
pub struct MemoryRepository {
    state: Mutex<State>,
}

impl MemoryRepository {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn state(&self) -> AppResult<MutexGuard<'_, State>> {
        self.state
            .lock()
            .map_err(|e| AppError::Storage(format!("state lock poisoned: {}", e)))
    }

    /// Stores a task as given, only assigning the id. Lets tests plant
    /// tasks with historical timestamps.
    pub fn add_task(&self, mut task: Task) -> Task {
        let mut state = self.state.lock().unwrap();
        state.last_task_id += 1;
        task.id = state.last_task_id;
        state.tasks.push(task.clone());
        task
    }

    pub fn user_count(&self) -> usize {
        self.state.lock().unwrap().users.len()
    }
}

fn user_matches(query: &UserQuery, user: &User) -> bool {
    let contains = |filter: &Option<String>, value: &str| {
        filter.as_deref().map_or(true, |needle| value.contains(needle))
    };

    query
        .passport_number
        .as_deref()
        .map_or(true, |passport| user.passport_number == passport)
        && contains(&query.surname, &user.surname)
        && contains(&query.name, &user.name)
        && contains(&query.address, &user.address)
}

fn apply_changes(changes: UserChanges, user: &mut User) {
    if let Some(passport_number) = changes.passport_number {
        user.passport_number = passport_number;
    }
    if let Some(surname) = changes.surname {
        user.surname = surname;
    }
    if let Some(name) = changes.name {
        user.name = name;
    }
    if let Some(patronymic) = changes.patronymic {
        user.patronymic = patronymic;
    }
    if let Some(address) = changes.address {
        user.address = address;
    }
}

fn task_matches(query: &TaskQuery, task: &Task) -> bool {
    task.user_id == query.user_id
        && query.created_from.map_or(true, |from| task.created_at >= from)
        && query.created_before.map_or(true, |before| task.created_at < before)
}

/// Same order as the SQL in `PgRepository::list_user_tasks`.
pub fn report_order(a: &Task, b: &Task) -> Ordering {
    let duration = |task: &Task| task.end_time.map(|end| end - task.start_time);
    let by_duration = match (duration(a), duration(b)) {
        (Some(da), Some(db)) => db.cmp(&da),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => b.start_time.cmp(&a.start_time),
    };
    by_duration.then(a.id.cmp(&b.id))
}

fn not_null_passport() -> AppError {
    AppError::Storage(
        "null value in column \"passport_number\" of relation \"users\" violates not-null constraint"
            .to_string(),
    )
}

fn duplicate_passport() -> AppError {
    AppError::Storage(
        "duplicate key value violates unique constraint \"users_passport_number_key\"".to_string(),
    )
}

#[async_trait]
impl Repository for MemoryRepository {
    async fn list_users(&self, query: UserQuery) -> AppResult<Vec<User>> {
        let state = self.state()?;
        Ok(state
            .users
            .iter()
            .filter(|user| user_matches(&query, user))
            .skip(query.offset as usize)
            .take(query.limit as usize)
            .cloned()
            .collect())
    }

    async fn find_user(&self, id: i32) -> AppResult<Option<User>> {
        let state = self.state()?;
        Ok(state.users.iter().find(|user| user.id == id).cloned())
    }

    async fn insert_user(&self, user: NewUser) -> AppResult<User> {
        let mut state = self.state()?;
        let passport_number = user.passport_number.ok_or_else(not_null_passport)?;
        if state
            .users
            .iter()
            .any(|existing| existing.passport_number == passport_number)
        {
            return Err(duplicate_passport());
        }

        let now = Utc::now();
        state.last_user_id += 1;
        let user = User {
            id: state.last_user_id,
            passport_number,
            surname: user.surname,
            name: user.name,
            patronymic: user.patronymic,
            address: user.address,
            created_at: now,
            updated_at: now,
        };
        state.users.push(user.clone());
        Ok(user)
    }

    async fn update_user(&self, id: i32, changes: UserChanges) -> AppResult<Option<User>> {
        let mut state = self.state()?;
        if let Some(passport_number) = &changes.passport_number {
            if state
                .users
                .iter()
                .any(|other| other.id != id && &other.passport_number == passport_number)
            {
                return Err(duplicate_passport());
            }
        }

        Ok(state.users.iter_mut().find(|user| user.id == id).map(|user| {
            apply_changes(changes, user);
            user.updated_at = Utc::now();
            user.clone()
        }))
    }

    async fn delete_user(&self, id: i32) -> AppResult<bool> {
        let mut state = self.state()?;
        let before = state.users.len();
        state.users.retain(|user| user.id != id);
        Ok(state.users.len() < before)
    }

    async fn list_user_tasks(&self, query: TaskQuery) -> AppResult<Vec<Task>> {
        let state = self.state()?;
        let mut tasks: Vec<Task> = state
            .tasks
            .iter()
            .filter(|task| task_matches(&query, task))
            .cloned()
            .collect();
        tasks.sort_by(report_order);
        Ok(tasks)
    }

    async fn insert_task(&self, task: NewTask, started_at: DateTime<Utc>) -> AppResult<Task> {
        let mut state = self.state()?;
        state.last_task_id += 1;
        let now = Utc::now();
        let task = Task {
            id: state.last_task_id,
            user_id: task.user_id,
            task_name: task.task_name,
            start_time: started_at,
            end_time: None,
            created_at: now,
            updated_at: now,
        };
        state.tasks.push(task.clone());
        Ok(task)
    }

    async fn end_task(&self, id: i32, ended_at: DateTime<Utc>) -> AppResult<Option<Task>> {
        let mut state = self.state()?;
        Ok(state.tasks.iter_mut().find(|task| task.id == id).map(|task| {
            task.end_time = Some(ended_at);
            task.updated_at = Utc::now();
            task.clone()
        }))
    }
}

pub fn repo_data(repo: &Arc<MemoryRepository>) -> web::Data<dyn Repository> {
    let repo: Arc<dyn Repository> = repo.clone();
    web::Data::from(repo)
}

pub fn create_user_request(passport_number: &str, surname: &str) -> TestRequest {
    TestRequest::post().uri("/users").set_json(json!({
        "passportNumber": passport_number,
        "surname": surname,
        "name": "Ivan",
        "patronymic": "Ivanovich",
        "address": "Moscow, Tverskaya 1"
    }))
}

pub fn start_task_request(user_id: i32, task_name: &str) -> TestRequest {
    TestRequest::post()
        .uri("/tasks")
        .set_json(json!({ "userId": user_id, "taskName": task_name }))
}
