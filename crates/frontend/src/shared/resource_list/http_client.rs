//! [`ResourceClient`] over the REST backend
//!
//! `GET/POST {api_root}/{collection}`, `PUT/DELETE {api_root}/{collection}/{id}`
//! and `GET {api_root}/{collection}/{search_path}?{search_param}=` where the
//! backend offers a search endpoint.

use async_trait::async_trait;
use contracts::domain::common::{Payload, Resource, ResourceId};
use gloo_net::http::{Request, RequestBuilder, Response};
use std::marker::PhantomData;
use std::rc::Rc;

use super::client::ResourceClient;
use super::controller::ResourceListController;
use super::error::ResourceError;
use super::query::filter_by_search;
use crate::system::auth::session::Session;

pub struct HttpResourceClient<E> {
    session: Session,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Resource> HttpResourceClient<E> {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            _entity: PhantomData,
        }
    }

    fn collection_url(&self) -> String {
        self.session.url(E::collection_name())
    }

    fn item_url(&self, id: &E::Id) -> String {
        format!("{}/{}", self.collection_url(), id.as_string())
    }

    fn search_url(&self, path: &str, query: &str) -> String {
        format!(
            "{}/{}?{}={}",
            self.collection_url(),
            path,
            E::search_param(),
            urlencoding::encode(query.trim())
        )
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.session.auth_header() {
            Some(value) => builder.header("Authorization", &value),
            None => builder,
        }
    }

    async fn send(&self, request: Result<Request, gloo_net::Error>) -> Result<Response, ResourceError> {
        let response = request
            .map_err(|e| ResourceError::Network(format!("Failed to serialize request: {}", e)))?
            .send()
            .await
            .map_err(|e| ResourceError::Network(e.to_string()))?;

        if response.ok() {
            return Ok(response);
        }
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        log::warn!("{} {}: {}", E::collection_name(), status, body);
        Err(ResourceError::from_status(status, &body))
    }

    async fn fetch_list(&self, url: &str) -> Result<Vec<E>, ResourceError> {
        let response = self.send(self.authorized(Request::get(url)).build()).await?;
        parse(response).await
    }
}

async fn parse<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, ResourceError> {
    let status = response.status();
    response.json::<T>().await.map_err(|e| ResourceError::Http {
        status,
        message: format!("Failed to parse response: {}", e),
    })
}

#[async_trait(?Send)]
impl<E: Resource> ResourceClient<E> for HttpResourceClient<E> {
    async fn list(&self) -> Result<Vec<E>, ResourceError> {
        self.fetch_list(&self.collection_url()).await
    }

    async fn create(&self, payload: &Payload) -> Result<E, ResourceError> {
        let request = self.authorized(Request::post(&self.collection_url())).json(payload);
        parse(self.send(request).await?).await
    }

    async fn update(&self, id: &E::Id, payload: &Payload) -> Result<E, ResourceError> {
        let request = self.authorized(Request::put(&self.item_url(id))).json(payload);
        parse(self.send(request).await?).await
    }

    async fn delete(&self, id: &E::Id) -> Result<(), ResourceError> {
        let request = self.authorized(Request::delete(&self.item_url(id))).build();
        self.send(request).await?;
        Ok(())
    }

    async fn search(&self, query: &str) -> Result<Vec<E>, ResourceError> {
        match E::search_path() {
            Some(path) => self.fetch_list(&self.search_url(path, query)).await,
            None => {
                let items = self.list().await?;
                Ok(filter_by_search(items.iter(), query).cloned().collect())
            }
        }
    }
}

/// List controller backed by the REST collection of `E`
pub fn connect<E: Resource>(session: Session) -> ResourceListController<E> {
    ResourceListController::new(Rc::new(HttpResourceClient::<E>::new(session)))
}
