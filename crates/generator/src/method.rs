//! Synthesis of resource class methods
//!
//! Every API method becomes one implementation, preceded by two overload
//! declarations when its object payload has no required fields. Parameters are
//! always ordered path params, then data, then options.

use crate::ast::{
    ClassMember, DocComment, Expr, MethodSignature, Param, Stmt, TypeExpr,
};
use crate::declarations::schema_type;
use resource_codegen_common::naming::camel_case;
use resource_codegen_common::Method;

/// Client-level options type accepted by every method
pub const REQUEST_OPTIONS: &str = "RequestOptions";

/// Return wrapper for paginated methods
pub const ITERABLE_PROMISE: &str = "IterablePromise";

/// How a method accepts its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataShape {
    /// No payload
    None,
    /// Object payload with required fields
    Required,
    /// Object payload without required fields; overloaded
    Optional,
    /// Array or scalar payload; passed through without a type alias
    Untyped,
}

impl DataShape {
    pub fn of(method: &Method) -> Self {
        match &method.data {
            None => DataShape::None,
            Some(data) if !data.is_object() => DataShape::Untyped,
            Some(data) if data.required.is_empty() => DataShape::Optional,
            Some(_) => DataShape::Required,
        }
    }
}

/// Alias of an object payload, or the inline schema type of any other
fn payload_type(method: &Method) -> Option<TypeExpr> {
    method.data.as_ref().map(|data| {
        if data.is_object() {
            TypeExpr::named(data.alias_name())
        } else {
            schema_type(data)
        }
    })
}

/// Produce the overload declarations (if any) followed by the implementation
pub fn synthesize_method(method: &Method) -> Vec<ClassMember> {
    let shape = DataShape::of(method);
    let returns = return_type(method);
    let path_params = path_params(method);
    let options = Param::optional("options", TypeExpr::named(REQUEST_OPTIONS));
    let payload_type = payload_type(method);

    let mut members = Vec::new();

    if shape == DataShape::Optional {
        // name(...pathParams, options?)
        members.push(ClassMember::Declaration(MethodSignature {
            doc: Some(doc_comment(method, false)),
            name: method.name.clone(),
            params: path_params
                .iter()
                .cloned()
                .chain(std::iter::once(options.clone()))
                .collect(),
            returns: returns.clone(),
        }));

        // name(...pathParams, data, options?)
        if let Some(payload) = &payload_type {
            members.push(ClassMember::Declaration(MethodSignature {
                doc: Some(doc_comment(method, true)),
                name: method.name.clone(),
                params: path_params
                    .iter()
                    .cloned()
                    .chain([Param::required("data", payload.clone()), options.clone()])
                    .collect(),
                returns: returns.clone(),
            }));
        }
    }

    let data_param = match (shape, payload_type) {
        (DataShape::Optional, Some(payload)) => Some(Param::optional(
            "dataOrOptions",
            TypeExpr::Union(vec![payload, TypeExpr::named(REQUEST_OPTIONS)]),
        )),
        (DataShape::Required | DataShape::Untyped, Some(payload)) => {
            Some(Param::required("data", payload))
        }
        _ => None,
    };

    let mut params = path_params;
    params.extend(data_param.clone());
    params.push(options);

    members.push(ClassMember::Method {
        signature: MethodSignature {
            doc: (shape != DataShape::Optional).then(|| doc_comment(method, true)),
            name: method.name.clone(),
            params,
            returns,
        },
        body: body(method, data_param.as_ref().map(|p| p.name.as_str())),
    });

    members
}

/// `Promise<T>`, `IterablePromise<T>` or `Promise<void>`
pub fn return_type(method: &Method) -> TypeExpr {
    let inner = method
        .object_returns()
        .map(|r| TypeExpr::named(r.alias_name()))
        .unwrap_or_else(|| TypeExpr::named("void"));

    let wrapper = if method.is_paged() {
        ITERABLE_PROMISE
    } else {
        "Promise"
    };

    TypeExpr::generic(wrapper, inner)
}

fn path_params(method: &Method) -> Vec<Param> {
    method
        .params
        .iter()
        .map(|p| Param::required(camel_case(&p.title), TypeExpr::named("string")))
        .collect()
}

fn body(method: &Method, data_arg: Option<&str>) -> Vec<Stmt> {
    let mut body = Vec::new();

    if method.beta {
        body.push(Stmt::Expr(Expr::call(
            "this.assertFeatureFlag",
            vec![Expr::Str(method.operation_id.clone())],
        )));
    }

    let mut descriptor = vec![
        (
            "method".to_string(),
            Expr::Str(method.http_method.as_str().to_string()),
        ),
        ("path".to_string(), Expr::Str(method.path.clone())),
    ];
    if method.is_paged() {
        descriptor.push(("paged".to_string(), Expr::Bool(true)));
    }

    let mut args = vec![Expr::Object(descriptor)];
    args.extend(method.params.iter().map(|p| Expr::ident(camel_case(&p.title))));
    args.extend(data_arg.map(Expr::ident));
    args.push(Expr::ident("options"));

    body.push(Stmt::Return(Expr::call("this.request", args)));
    body
}

fn doc_comment(method: &Method, include_data: bool) -> DocComment {
    let mut lines = Vec::new();

    if let Some(text) = method
        .description
        .as_deref()
        .or(method.summary.as_deref())
        .filter(|t| !t.trim().is_empty())
    {
        lines.push(text.trim().to_string());
        lines.push(String::new());
    }

    for param in &method.params {
        lines.push(param_line(&camel_case(&param.title), param.description.as_deref()));
    }

    if include_data {
        if let Some(data) = &method.data {
            lines.push(param_line("data", data.description.as_deref()));
        }
    }

    lines.push("@param options - override client request options.".to_string());

    if let Some(returns) = &method.returns {
        lines.push(
            format!("@returns {}", returns.description.as_deref().unwrap_or(""))
                .trim_end()
                .to_string(),
        );
    }

    if method.beta {
        lines.push(String::new());
        lines.push("@beta".to_string());
    }

    DocComment { lines }
}

fn param_line(name: &str, description: Option<&str>) -> String {
    match description.filter(|d| !d.trim().is_empty()) {
        Some(d) => format!("@param {} - {}", name, d.trim()),
        None => format!("@param {}", name),
    }
}
