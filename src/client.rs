//! Provider client
//!
//! [`ResellerClient`] ties the pieces together: it signs and sends requests
//! through a [`Transport`], interprets the responses, and keeps the
//! per-instance caches (account info and one catalog slot per category).
//!
//! Calls are sequential; cache-filling methods take `&mut self`.

use rust_decimal::Decimal;
use serde_json::Value;
use tracing::{debug, info};

use crate::account::AccountInfo;
use crate::auth::AuthSigner;
use crate::catalog::{ServiceCatalog, ServiceCategory, ServiceMap, normalize_services};
use crate::config::{ClientConfig, ProviderConfig};
use crate::error::{ClientError, ClientResult};
use crate::order::{Order, OrderStatus, UploadContext, build_payload};
use crate::response::interpret;
use crate::transport::{ApiRequest, HttpTransport, Method, Payload, RawResponse, Transport};
use crate::value::to_u64;

pub const ACCEPT_HEADER: &str = "Accept";
pub const AUTH_HEADER: &str = "Auth-Key";

pub struct ResellerClient<T: Transport = HttpTransport> {
    base_url: String,
    signer: AuthSigner,
    uploads: UploadContext,
    transport: T,
    account_info: Option<AccountInfo>,
    catalog: ServiceCatalog,
}

impl ResellerClient<HttpTransport> {
    /// Client over HTTP, configured from `config`.
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let transport = HttpTransport::new(&config.provider)?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: Transport> ResellerClient<T> {
    pub fn with_transport(config: &ClientConfig, transport: T) -> Self {
        let ProviderConfig {
            base_url,
            username,
            api_key,
            auth_scheme,
            ..
        } = &config.provider;

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            signer: AuthSigner::new(username.as_str(), api_key.as_str(), *auth_scheme),
            uploads: UploadContext::new(&config.uploads.dir, config.uploads.missing_file),
            transport,
            account_info: None,
            catalog: ServiceCatalog::new(),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn uploads(&self) -> &UploadContext {
        &self.uploads
    }

    /// `{base_url}/api/{route}`
    pub fn url(&self, route: &str) -> String {
        format!("{}/api/{}", self.base_url, route)
    }

    fn request(&self, route: &str, mut params: Payload, method: Method) -> ClientResult<ApiRequest> {
        params.insert("username", self.signer.username());

        Ok(ApiRequest {
            method,
            url: self.url(route),
            params,
            headers: vec![
                (ACCEPT_HEADER.to_string(), "application/json".to_string()),
                (AUTH_HEADER.to_string(), self.signer.auth_key()?),
            ],
        })
    }

    /// Send a request and return the undecoded response.
    pub async fn call_raw(
        &self,
        route: &str,
        params: Payload,
        method: Method,
    ) -> ClientResult<RawResponse> {
        let request = self.request(route, params, method)?;
        debug!(%method, route, fields = request.params.len(), "calling provider");
        self.transport.execute(request).await
    }

    /// Send a request and decode the body, failing on provider errors.
    pub async fn call(&self, route: &str, params: Payload, method: Method) -> ClientResult<Value> {
        let response = self.call_raw(route, params, method).await?;
        interpret(&response.body)
    }

    /// Account info, fetched once per client.
    pub async fn get_account_info(&mut self) -> ClientResult<&AccountInfo> {
        let info = match self.account_info.take() {
            Some(info) => info,
            None => {
                let body = self.call("", Payload::new(), Method::Get).await?;
                AccountInfo::from_value(&body)
            }
        };

        Ok(&*self.account_info.insert(info))
    }

    pub async fn get_balance(&mut self) -> ClientResult<Decimal> {
        Ok(self.get_account_info().await?.balance)
    }

    pub async fn get_currency(&mut self) -> ClientResult<String> {
        Ok(self.get_account_info().await?.currency.clone())
    }

    /// Services of `category`, fetched on first use and cached afterwards.
    pub async fn get_services(&mut self, category: ServiceCategory) -> ClientResult<&ServiceMap> {
        let services = match self.catalog.take(category) {
            Some(services) => services,
            None => {
                let body = self
                    .call(category.endpoint(), Payload::new(), Method::Get)
                    .await?;
                let services = normalize_services(&body, category)?;
                info!(%category, count = services.len(), "loaded service catalog");
                services
            }
        };

        Ok(self.catalog.store(category, services))
    }

    pub async fn get_imei_services(&mut self) -> ClientResult<&ServiceMap> {
        self.get_services(ServiceCategory::Imei).await
    }

    pub async fn get_server_services(&mut self) -> ClientResult<&ServiceMap> {
        self.get_services(ServiceCategory::Server).await
    }

    pub async fn get_file_services(&mut self) -> ClientResult<&ServiceMap> {
        self.get_services(ServiceCategory::File).await
    }

    /// Submit `order`, then record the provider's id and response on it.
    pub async fn place_order<'o>(&self, order: &'o mut Order) -> ClientResult<&'o mut Order> {
        let payload = build_payload(order, &self.uploads)?;
        let body = self
            .call(order.kind().endpoint(), payload, Method::Post)
            .await?;

        order.response = response_field(&body);
        order.id = match body.get("id") {
            None | Some(Value::Null) => 0,
            Some(id) => to_u64(id).ok_or_else(|| {
                ClientError::MalformedResponse(format!("order id is not numeric: {}", id))
            })?,
        };

        info!(kind = %order.kind(), id = order.id, service_id = %order.service_id, "order placed");
        Ok(order)
    }

    /// Refresh `order` from the provider. The reported status is stored as is.
    pub async fn get_order<'o>(&self, order: &'o mut Order) -> ClientResult<&'o mut Order> {
        let body = self.call(&order.route(), Payload::new(), Method::Get).await?;

        order.response = response_field(&body);
        order.status = match body.get("status") {
            None | Some(Value::Null) => {
                return Err(ClientError::MalformedResponse(format!(
                    "order {} has no status",
                    order.route()
                )));
            }
            Some(status) => OrderStatus::from_value(status),
        };

        info!(kind = %order.kind(), id = order.id, status = ?order.status, "order refreshed");
        Ok(order)
    }
}

fn response_field(body: &Value) -> Option<Value> {
    body.get("response").filter(|r| !r.is_null()).cloned()
}

impl Order {
    /// Submit this order through `client`.
    pub async fn send<T: Transport>(&mut self, client: &ResellerClient<T>) -> ClientResult<&mut Self> {
        client.place_order(self).await
    }

    /// Refresh this order through `client`.
    pub async fn get<T: Transport>(&mut self, client: &ResellerClient<T>) -> ClientResult<&mut Self> {
        client.get_order(self).await
    }
}
