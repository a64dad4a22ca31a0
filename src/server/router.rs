//! Request routing
//!
//! Maps a parsed request onto one of the fixed routes and produces the
//! response. Routes are matched in priority order:
//!
//! | Target          | Methods    | Result                                |
//! |-----------------|------------|---------------------------------------|
//! | `/`             | any        | 200, empty                            |
//! | `/echo/<rest>`  | any        | 200, `<rest>` as text/plain           |
//! | `/user-agent`   | any        | 200, User-Agent value as text/plain   |
//! | `/files/<rest>` | GET, POST  | read / write `<rest>` under the root  |
//! | `/files/<rest>` | other      | 405                                   |
//! | anything else   | any        | 404                                   |

use crate::files::FileService;
use crate::http::request::{Method, Request};
use crate::http::response::{Response, ResponseBuilder};
use crate::http::status::StatusCode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route<'a> {
    Root,
    Echo(&'a str),
    UserAgent,
    Files(&'a str),
    NotFound,
}

impl<'a> Route<'a> {
    pub fn resolve(target: &'a str) -> Self {
        if target == "/" {
            Route::Root
        } else if let Some(rest) = target.strip_prefix("/echo/") {
            Route::Echo(rest)
        } else if target == "/user-agent" {
            Route::UserAgent
        } else if let Some(rest) = target.strip_prefix("/files/") {
            Route::Files(rest)
        } else {
            Route::NotFound
        }
    }
}

#[derive(Debug, Clone)]
pub struct Router {
    files: FileService,
}

impl Router {
    pub fn new(files: FileService) -> Self {
        Self { files }
    }

    pub async fn handle(&self, req: &Request) -> Response {
        let route = Route::resolve(&req.target);

        let response = match route {
            Route::Root => Response::ok(),
            Route::Echo(rest) => Response::text(StatusCode::OK, rest),
            Route::UserAgent => Response::text(StatusCode::OK, req.user_agent()),
            Route::Files(rest) => self.handle_files(req, rest).await,
            Route::NotFound => Response::not_found(),
        };

        tracing::debug!(
            method = %req.method,
            target = %req.target,
            status = response.status.as_u16(),
            "Request dispatched"
        );

        response
    }

    async fn handle_files(&self, req: &Request, relative: &str) -> Response {
        match req.method {
            Method::GET => match self.files.read(relative).await {
                Ok(bytes) => Response::octet_stream(bytes),
                Err(e) => {
                    tracing::debug!(error = %e, "File read failed");
                    e.into_response()
                }
            },
            Method::POST => match self.files.write(relative, &req.body).await {
                Ok(()) => Response::created(),
                Err(e) => {
                    tracing::warn!(error = %e, "File write failed");
                    e.into_response()
                }
            },
            Method::Other(_) => ResponseBuilder::new(StatusCode::METHOD_NOT_ALLOWED)
                .header("Allow", "GET, POST")
                .build(),
        }
    }
}
