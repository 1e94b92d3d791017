use crate::{Client, Error, Poll, Response};
use clusters_model::List;
use reqwest::{Method, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use std::marker::PhantomData;

/// Page size of list requests which don't set one.
pub const DEFAULT_PAGE_SIZE: i64 = 100;

/// Collection of resources at a path, such as the clusters or the machine
/// pools of a cluster.
pub struct Collection<T> {
    client: Client,
    path: String,
    phantom: PhantomData<fn() -> T>,
}

/// Single resource at a path, either an item of a collection or a
/// sub-resource such as the status of a cluster.
pub struct Item<T> {
    client: Client,
    path: String,
    phantom: PhantomData<fn() -> T>,
}

// Manual impls, as derive would bound T: Clone.
impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self::new(&self.client, self.path.clone())
    }
}

impl<T> Clone for Item<T> {
    fn clone(&self) -> Self {
        Self::new(&self.client, self.path.clone())
    }
}

impl<T> Collection<T> {
    pub fn new(client: &Client, path: impl Into<String>) -> Self {
        Self {
            client: client.clone(),
            path: path.into(),
            phantom: PhantomData,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn list(&self) -> ListRequest<T> {
        ListRequest {
            client: self.client.clone(),
            path: self.path.clone(),
            search: None,
            order: None,
            page: None,
            size: None,
            parameters: Vec::new(),
            phantom: PhantomData,
        }
    }

    /// Request which adds `body` to the collection.
    pub fn add(&self, body: T) -> AddRequest<T> {
        AddRequest {
            client: self.client.clone(),
            path: self.path.clone(),
            parameters: Vec::new(),
            body,
        }
    }

    pub fn item(&self, id: &str) -> Item<T> {
        Item::new(&self.client, format!("{}/{}", self.path, id))
    }
}

impl<T> Item<T> {
    pub fn new(client: &Client, path: impl Into<String>) -> Self {
        Self {
            client: client.clone(),
            path: path.into(),
            phantom: PhantomData,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Request which applies the attributes present in `body` to the resource.
    pub fn update(&self, body: T) -> UpdateRequest<T> {
        UpdateRequest {
            client: self.client.clone(),
            path: self.path.clone(),
            parameters: Vec::new(),
            body,
        }
    }

    pub fn delete(&self) -> DeleteRequest {
        DeleteRequest {
            client: self.client.clone(),
            path: self.path.clone(),
            parameters: Vec::new(),
        }
    }

    /// Posts to an action of the resource, such as `hibernate`.
    pub(crate) async fn action(&self, action: &str) -> Result<Response<()>, Error> {
        self.client
            .send_empty(Method::POST, &format!("{}/{action}", self.path), &[], None)
            .await
    }
}

impl<T: DeserializeOwned> Item<T> {
    pub async fn get(&self) -> Result<Response<T>, Error> {
        self.client.send(Method::GET, &self.path, &[], None).await
    }

    /// Polls the resource until it satisfies a condition.
    pub fn poll(&self) -> Poll<T> {
        Poll::new(self.clone())
    }
}

/// Request of a page of a collection.
pub struct ListRequest<T> {
    client: Client,
    path: String,
    search: Option<String>,
    order: Option<String>,
    page: Option<i64>,
    size: Option<i64>,
    parameters: Vec<(String, String)>,
    phantom: PhantomData<fn() -> T>,
}

impl<T> Clone for ListRequest<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            path: self.path.clone(),
            search: self.search.clone(),
            order: self.order.clone(),
            page: self.page,
            size: self.size,
            parameters: self.parameters.clone(),
            phantom: PhantomData,
        }
    }
}

/// Page of a collection returned by a [`ListRequest`].
#[derive(Debug, Clone)]
pub struct ListResponse<T> {
    pub status: StatusCode,
    /// Index of the returned page, where one is the first page.
    pub page: i64,
    /// Number of items in the returned page.
    pub size: i64,
    /// Number of items of the collection which match the search.
    pub total: i64,
    pub items: List<T>,
}

#[derive(serde::Deserialize)]
struct ListBody<T> {
    #[serde(default)]
    page: i64,
    #[serde(default)]
    size: i64,
    #[serde(default)]
    total: i64,
    items: Option<Vec<T>>,
}

impl<T> ListRequest<T> {
    /// Restricts the listed items with an expression of the search language,
    /// such as `name like 'my%' and state = 'ready'`.
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Orders the listed items, for example with `creation_timestamp desc`.
    pub fn order(mut self, order: impl Into<String>) -> Self {
        self.order = Some(order.into());
        self
    }

    pub fn page(mut self, page: i64) -> Self {
        self.page = Some(page);
        self
    }

    pub fn size(mut self, size: i64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn parameter(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.parameters.push((name.into(), value.to_string()));
        self
    }

    pub(crate) fn page_number(&self) -> Option<i64> {
        self.page
    }

    pub(crate) fn page_size(&self) -> Option<i64> {
        self.size
    }

    fn query(&self) -> Vec<(String, String)> {
        let mut query = self.parameters.clone();
        if let Some(page) = self.page {
            query.push(("page".to_string(), page.to_string()));
        }
        if let Some(size) = self.size {
            query.push(("size".to_string(), size.to_string()));
        }
        if let Some(search) = &self.search {
            query.push(("search".to_string(), search.clone()));
        }
        if let Some(order) = &self.order {
            query.push(("order".to_string(), order.clone()));
        }
        query
    }
}

impl<T: DeserializeOwned> ListRequest<T> {
    pub async fn send(&self) -> Result<ListResponse<T>, Error> {
        let Response { status, body } = self
            .client
            .send::<ListBody<T>>(Method::GET, &self.path, &self.query(), None)
            .await?;

        Ok(ListResponse {
            status,
            page: body.page,
            size: body.size,
            total: body.total,
            items: body.items.unwrap_or_default().into_iter().collect(),
        })
    }
}

impl<T> ListRequest<T>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    /// Stream of every item of the collection matching the request, starting
    /// at its page (or the first page) and turning pages until the last.
    pub fn items(self) -> impl futures::Stream<Item = Result<T, Error>> {
        crate::pagination::into_items(self)
    }
}

/// Request which adds a resource to a collection.
pub struct AddRequest<T> {
    client: Client,
    path: String,
    parameters: Vec<(String, String)>,
    body: T,
}

impl<T: Serialize + DeserializeOwned> AddRequest<T> {
    pub fn parameter(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.parameters.push((name.into(), value.to_string()));
        self
    }

    /// Asks the server to validate the resource without creating it.
    pub fn dry_run(self, dry_run: bool) -> Self {
        self.parameter("dryRun", dry_run)
    }

    pub fn body(self, body: T) -> Self {
        Self { body, ..self }
    }

    /// Sends the request, returning the created resource.
    pub async fn send(&self) -> Result<Response<T>, Error> {
        let body = clusters_model::marshal_to_string(&self.body).map_err(Error::Encode)?;
        self.client
            .send(Method::POST, &self.path, &self.parameters, Some(body))
            .await
    }
}

/// Request which updates a resource.
pub struct UpdateRequest<T> {
    client: Client,
    path: String,
    parameters: Vec<(String, String)>,
    body: T,
}

impl<T: Serialize + DeserializeOwned> UpdateRequest<T> {
    pub fn parameter(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.parameters.push((name.into(), value.to_string()));
        self
    }

    pub fn body(self, body: T) -> Self {
        Self { body, ..self }
    }

    /// Sends the request, returning the updated resource.
    pub async fn send(&self) -> Result<Response<T>, Error> {
        let body = clusters_model::marshal_to_string(&self.body).map_err(Error::Encode)?;
        self.client
            .send(Method::PATCH, &self.path, &self.parameters, Some(body))
            .await
    }
}

/// Request which deletes a resource.
pub struct DeleteRequest {
    client: Client,
    path: String,
    parameters: Vec<(String, String)>,
}

impl DeleteRequest {
    pub fn parameter(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.parameters.push((name.into(), value.to_string()));
        self
    }

    /// Asks the server to carry on with the deletion even if some of the
    /// cloud resources of the cluster can't be removed.
    pub fn best_effort(self, best_effort: bool) -> Self {
        self.parameter("best_effort", best_effort)
    }

    pub fn dry_run(self, dry_run: bool) -> Self {
        self.parameter("dryRun", dry_run)
    }

    pub async fn send(&self) -> Result<Response<()>, Error> {
        self.client
            .send_empty(Method::DELETE, &self.path, &self.parameters, None)
            .await
    }
}
