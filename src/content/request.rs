use std::marker::PhantomData;

use futures::{Stream, TryStreamExt, stream};

use super::{ContentResource, Paginated};
use crate::core::net::QueryParams;
use crate::core::{CacheMode, GhostClient, GhostError, Limit, wire};

fn join_csv(values: &[String]) -> Option<String> {
    (!values.is_empty()).then(|| values.join(","))
}

fn extend_csv<I, S>(target: &mut Vec<String>, values: I)
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    target.extend(values.into_iter().map(Into::into));
}

/// Options shared by browse and read requests.
#[derive(Debug, Clone, Default)]
struct Shape {
    include: Vec<String>,
    fields: Vec<String>,
    formats: Vec<String>,
}

impl Shape {
    fn apply(&self, params: &mut QueryParams) {
        for (name, values) in [
            ("include", &self.include),
            ("fields", &self.fields),
            ("formats", &self.formats),
        ] {
            if let Some(v) = join_csv(values) {
                params.insert(name.to_string(), v);
            }
        }
    }
}

/// A builder for browsing one collection of the Content API.
///
/// Created by [`GhostClient::posts`], [`GhostClient::pages`],
/// [`GhostClient::tags`], [`GhostClient::authors`] and [`GhostClient::tiers`].
///
/// ```no_run
/// # use ghost_content_rs::GhostClient;
/// # #[tokio::main]
/// # async fn main() -> Result<(), ghost_content_rs::GhostError> {
/// let client = GhostClient::new("demo.ghost.io", "22444f78447824223cefc48062")?;
/// let page = client
///     .posts()
///     .limit(15)
///     .page(2)
///     .include(["tags", "authors"])
///     .filter("tag:getting-started")
///     .fetch()
///     .await?;
/// println!("{} posts, next page: {:?}", page.len(), page.next_page());
/// # Ok(())
/// # }
/// ```
pub struct Browse<R> {
    client: GhostClient,
    limit: Option<Limit>,
    page: Option<u32>,
    filter: Option<String>,
    order: Option<String>,
    shape: Shape,
    cache_mode: CacheMode,
    _resource: PhantomData<fn() -> R>,
}

impl<R> Clone for Browse<R> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            limit: self.limit,
            page: self.page,
            filter: self.filter.clone(),
            order: self.order.clone(),
            shape: self.shape.clone(),
            cache_mode: self.cache_mode,
            _resource: PhantomData,
        }
    }
}

impl<R: ContentResource> Browse<R> {
    pub(crate) fn new(client: &GhostClient) -> Self {
        Self {
            client: client.clone(),
            limit: None,
            page: None,
            filter: None,
            order: None,
            shape: Shape::default(),
            cache_mode: CacheMode::Use,
            _resource: PhantomData,
        }
    }

    /// Sets the number of items per page.
    #[must_use]
    pub const fn limit(mut self, n: u32) -> Self {
        self.limit = Some(Limit::Count(n));
        self
    }

    /// Requests every item on a single page (`limit=all`).
    #[must_use]
    pub const fn all(mut self) -> Self {
        self.limit = Some(Limit::All);
        self
    }

    /// Sets the 1-based page to fetch.
    #[must_use]
    pub const fn page(mut self, n: u32) -> Self {
        self.page = Some(n);
        self
    }

    /// Adds relations to embed, e.g. `tags`, `authors` or `count.posts`.
    #[must_use]
    pub fn include<I, S>(mut self, relations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        extend_csv(&mut self.shape.include, relations);
        self
    }

    /// Sets an NQL filter expression, e.g. `tag:getting-started+featured:true`.
    #[must_use]
    pub fn filter(mut self, nql: impl Into<String>) -> Self {
        self.filter = Some(nql.into());
        self
    }

    /// Restricts the returned fields.
    #[must_use]
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        extend_csv(&mut self.shape.fields, fields);
        self
    }

    /// Selects body formats (`html`, `plaintext`) for posts and pages.
    #[must_use]
    pub fn formats<I, S>(mut self, formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        extend_csv(&mut self.shape.formats, formats);
        self
    }

    /// Sets the sort order, e.g. `published_at desc`.
    #[must_use]
    pub fn order(mut self, order: impl Into<String>) -> Self {
        self.order = Some(order.into());
        self
    }

    /// Sets the cache mode for this specific API call.
    #[must_use]
    pub const fn cache_mode(mut self, mode: CacheMode) -> Self {
        self.cache_mode = mode;
        self
    }

    pub(crate) fn params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        if let Some(limit) = self.limit {
            params.insert("limit".into(), limit.to_string());
        }
        if let Some(page) = self.page {
            params.insert("page".into(), page.to_string());
        }
        if let Some(filter) = &self.filter {
            params.insert("filter".into(), filter.clone());
        }
        if let Some(order) = &self.order {
            params.insert("order".into(), order.clone());
        }
        self.shape.apply(&mut params);
        params
    }

    /// Executes the request and returns one page of results.
    ///
    /// # Errors
    ///
    /// Returns a `GhostError` if the request fails after all retries, is
    /// cancelled, or the body does not match the expected shape.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err, fields(resource = R::COLLECTION)))]
    pub async fn fetch(self) -> Result<Paginated<R>, GhostError> {
        let params = self.params();
        let body = self
            .client
            .execute(&[R::COLLECTION], &params, self.cache_mode)
            .await?;
        wire::decode_list(&body)
    }

    /// Walks the collection page by page, starting at the configured page
    /// (or the first one), following `meta.pagination` until the last page.
    pub fn pages(self) -> impl Stream<Item = Result<Paginated<R>, GhostError>> + Send + 'static {
        let start = self.page.unwrap_or(1);
        stream::try_unfold(Some((self, start)), |state| async move {
            let Some((browse, page)) = state else {
                return Ok(None);
            };
            let current = browse.clone().page(page).fetch().await?;
            let next = current.next_page().map(|n| (browse, n));
            Ok::<_, GhostError>(Some((current, next)))
        })
    }

    /// Fetches every remaining page and concatenates the items.
    ///
    /// # Errors
    ///
    /// Fails with the first error any page produces.
    pub async fn fetch_all(self) -> Result<Vec<R>, GhostError> {
        self.pages()
            .try_fold(Vec::new(), |mut acc, page| async move {
                acc.extend(page.items);
                Ok::<_, GhostError>(acc)
            })
            .await
    }
}

#[derive(Debug, Clone)]
enum Lookup {
    Id(String),
    Slug(String),
}

/// A builder for reading one item of a collection by id or slug.
pub struct Read<R> {
    client: GhostClient,
    lookup: Lookup,
    shape: Shape,
    cache_mode: CacheMode,
    _resource: PhantomData<fn() -> R>,
}

impl<R: ContentResource> Read<R> {
    pub(crate) fn by_id(client: &GhostClient, id: impl Into<String>) -> Self {
        Self::with_lookup(client, Lookup::Id(id.into()))
    }

    pub(crate) fn by_slug(client: &GhostClient, slug: impl Into<String>) -> Self {
        Self::with_lookup(client, Lookup::Slug(slug.into()))
    }

    fn with_lookup(client: &GhostClient, lookup: Lookup) -> Self {
        Self {
            client: client.clone(),
            lookup,
            shape: Shape::default(),
            cache_mode: CacheMode::Use,
            _resource: PhantomData,
        }
    }

    /// Adds relations to embed.
    #[must_use]
    pub fn include<I, S>(mut self, relations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        extend_csv(&mut self.shape.include, relations);
        self
    }

    /// Restricts the returned fields.
    #[must_use]
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        extend_csv(&mut self.shape.fields, fields);
        self
    }

    /// Selects body formats (`html`, `plaintext`) for posts and pages.
    #[must_use]
    pub fn formats<I, S>(mut self, formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        extend_csv(&mut self.shape.formats, formats);
        self
    }

    /// Sets the cache mode for this specific API call.
    #[must_use]
    pub const fn cache_mode(mut self, mode: CacheMode) -> Self {
        self.cache_mode = mode;
        self
    }

    /// Path segments; the identifier is always a single segment.
    fn segments(&self) -> Vec<&str> {
        match &self.lookup {
            Lookup::Id(id) => vec![R::COLLECTION, id.as_str()],
            Lookup::Slug(slug) => vec![R::COLLECTION, "slug", slug.as_str()],
        }
    }

    fn identifier(&self) -> &str {
        match &self.lookup {
            Lookup::Id(s) | Lookup::Slug(s) => s,
        }
    }

    /// Executes the request and returns the item.
    ///
    /// # Errors
    ///
    /// Returns [`GhostError::ResourceNotFound`] if the server answers with an
    /// empty list, or any other `GhostError` the request pipeline produces.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err, fields(resource = R::COLLECTION)))]
    pub async fn fetch(self) -> Result<R, GhostError> {
        let mut params = QueryParams::new();
        self.shape.apply(&mut params);
        let body = self
            .client
            .execute(&self.segments(), &params, self.cache_mode)
            .await?;
        wire::decode_single(&body, self.identifier())
    }
}
