//! In-memory catalog store
//!
//! Keeps every collection in insertion order behind a single lock. Nothing is
//! persisted; used by the test suite and by `database.backend = "memory"`.

use async_trait::async_trait;
use indexmap::IndexMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::CatalogStore;
use crate::{
    error::AppResult,
    models::{
        author::AuthorFields, book::BookFields, book_instance::BookInstanceFields,
        genre::GenreFields, Author, Book, BookInstance, BookInstanceStatus, Genre,
    },
};

#[derive(Default)]
struct Collections {
    authors: IndexMap<Uuid, Author>,
    genres: IndexMap<Uuid, Genre>,
    books: IndexMap<Uuid, Book>,
    book_instances: IndexMap<Uuid, BookInstance>,
}

#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn sorted_by<T: Clone, K: Ord>(values: impl Iterator<Item = T>, key: impl Fn(&T) -> K) -> Vec<T> {
    let mut out: Vec<T> = values.collect();
    out.sort_by_key(|v| key(v));
    out
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }

    async fn authors_list(&self) -> AppResult<Vec<Author>> {
        let inner = self.inner.read().await;
        Ok(sorted_by(inner.authors.values().cloned(), |a| {
            (a.family_name.clone(), a.first_name.clone())
        }))
    }

    async fn authors_get(&self, id: Uuid) -> AppResult<Option<Author>> {
        Ok(self.inner.read().await.authors.get(&id).cloned())
    }

    async fn authors_create(&self, data: &AuthorFields) -> AppResult<Author> {
        let author = Author {
            id: Uuid::new_v4(),
            first_name: data.first_name.clone(),
            family_name: data.family_name.clone(),
            date_of_birth: data.date_of_birth,
            date_of_death: data.date_of_death,
        };
        self.inner.write().await.authors.insert(author.id, author.clone());
        Ok(author)
    }

    async fn authors_update(&self, id: Uuid, data: &AuthorFields) -> AppResult<Option<Author>> {
        let mut inner = self.inner.write().await;
        Ok(inner.authors.get_mut(&id).map(|author| {
            author.first_name = data.first_name.clone();
            author.family_name = data.family_name.clone();
            author.date_of_birth = data.date_of_birth;
            author.date_of_death = data.date_of_death;
            author.clone()
        }))
    }

    async fn authors_delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.inner.write().await.authors.shift_remove(&id).is_some())
    }

    async fn authors_count(&self) -> AppResult<i64> {
        Ok(self.inner.read().await.authors.len() as i64)
    }

    async fn genres_list(&self) -> AppResult<Vec<Genre>> {
        let inner = self.inner.read().await;
        Ok(sorted_by(inner.genres.values().cloned(), |g| g.name.clone()))
    }

    async fn genres_get(&self, id: Uuid) -> AppResult<Option<Genre>> {
        Ok(self.inner.read().await.genres.get(&id).cloned())
    }

    async fn genres_get_many(&self, ids: &[Uuid]) -> AppResult<Vec<Genre>> {
        let inner = self.inner.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| inner.genres.get(id).cloned())
            .collect())
    }

    async fn genres_find_by_name(&self, name: &str) -> AppResult<Option<Genre>> {
        let inner = self.inner.read().await;
        Ok(inner.genres.values().find(|g| g.name == name).cloned())
    }

    async fn genres_create(&self, data: &GenreFields) -> AppResult<Genre> {
        let genre = Genre {
            id: Uuid::new_v4(),
            name: data.name.clone(),
        };
        self.inner.write().await.genres.insert(genre.id, genre.clone());
        Ok(genre)
    }

    async fn genres_update(&self, id: Uuid, data: &GenreFields) -> AppResult<Option<Genre>> {
        let mut inner = self.inner.write().await;
        Ok(inner.genres.get_mut(&id).map(|genre| {
            genre.name = data.name.clone();
            genre.clone()
        }))
    }

    async fn genres_delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.inner.write().await.genres.shift_remove(&id).is_some())
    }

    async fn genres_count(&self) -> AppResult<i64> {
        Ok(self.inner.read().await.genres.len() as i64)
    }

    async fn books_list(&self) -> AppResult<Vec<Book>> {
        let inner = self.inner.read().await;
        Ok(sorted_by(inner.books.values().cloned(), |b| b.title.clone()))
    }

    async fn books_get(&self, id: Uuid) -> AppResult<Option<Book>> {
        Ok(self.inner.read().await.books.get(&id).cloned())
    }

    async fn books_by_author(&self, author_id: Uuid) -> AppResult<Vec<Book>> {
        let inner = self.inner.read().await;
        Ok(sorted_by(
            inner.books.values().filter(|b| b.author == author_id).cloned(),
            |b| b.title.clone(),
        ))
    }

    async fn books_by_genre(&self, genre_id: Uuid) -> AppResult<Vec<Book>> {
        let inner = self.inner.read().await;
        Ok(sorted_by(
            inner.books.values().filter(|b| b.genre.contains(&genre_id)).cloned(),
            |b| b.title.clone(),
        ))
    }

    async fn books_create(&self, data: &BookFields) -> AppResult<Book> {
        let book = Book {
            id: Uuid::new_v4(),
            title: data.title.clone(),
            author: data.author,
            summary: data.summary.clone(),
            isbn: data.isbn.clone(),
            genre: data.genre.clone(),
        };
        self.inner.write().await.books.insert(book.id, book.clone());
        Ok(book)
    }

    async fn books_update(&self, id: Uuid, data: &BookFields) -> AppResult<Option<Book>> {
        let mut inner = self.inner.write().await;
        Ok(inner.books.get_mut(&id).map(|book| {
            book.title = data.title.clone();
            book.author = data.author;
            book.summary = data.summary.clone();
            book.isbn = data.isbn.clone();
            book.genre = data.genre.clone();
            book.clone()
        }))
    }

    async fn books_delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.inner.write().await.books.shift_remove(&id).is_some())
    }

    async fn books_count(&self) -> AppResult<i64> {
        Ok(self.inner.read().await.books.len() as i64)
    }

    async fn book_instances_list(&self) -> AppResult<Vec<BookInstance>> {
        let inner = self.inner.read().await;
        Ok(sorted_by(inner.book_instances.values().cloned(), |i| {
            i.imprint.clone()
        }))
    }

    async fn book_instances_get(&self, id: Uuid) -> AppResult<Option<BookInstance>> {
        Ok(self.inner.read().await.book_instances.get(&id).cloned())
    }

    async fn book_instances_by_book(&self, book_id: Uuid) -> AppResult<Vec<BookInstance>> {
        let inner = self.inner.read().await;
        Ok(sorted_by(
            inner
                .book_instances
                .values()
                .filter(|i| i.book == book_id)
                .cloned(),
            |i| i.imprint.clone(),
        ))
    }

    async fn book_instances_create(&self, data: &BookInstanceFields) -> AppResult<BookInstance> {
        let instance = BookInstance {
            id: Uuid::new_v4(),
            book: data.book,
            imprint: data.imprint.clone(),
            status: data.status,
            due_back: data.due_back,
        };
        self.inner
            .write()
            .await
            .book_instances
            .insert(instance.id, instance.clone());
        Ok(instance)
    }

    async fn book_instances_update(
        &self,
        id: Uuid,
        data: &BookInstanceFields,
    ) -> AppResult<Option<BookInstance>> {
        let mut inner = self.inner.write().await;
        Ok(inner.book_instances.get_mut(&id).map(|instance| {
            instance.book = data.book;
            instance.imprint = data.imprint.clone();
            instance.status = data.status;
            instance.due_back = data.due_back;
            instance.clone()
        }))
    }

    async fn book_instances_delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self
            .inner
            .write()
            .await
            .book_instances
            .shift_remove(&id)
            .is_some())
    }

    async fn book_instances_count(&self) -> AppResult<i64> {
        Ok(self.inner.read().await.book_instances.len() as i64)
    }

    async fn book_instances_count_by_status(&self, status: BookInstanceStatus) -> AppResult<i64> {
        let inner = self.inner.read().await;
        Ok(inner
            .book_instances
            .values()
            .filter(|i| i.status == status)
            .count() as i64)
    }
}
