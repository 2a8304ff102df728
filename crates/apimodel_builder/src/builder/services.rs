//! Endpoint interfaces, faults and resources.

use apimodel_declaration::{
    Annotation, Annotations, Declaration, MethodDecl, ParamDecl, TypeRef, names,
};
use apimodel_foundation::{Error, ErrorKind, NodeRef, QName, Result, capitalize};
use apimodel_model::{
    EndpointInterface, Fault, FaultDetail, FaultId, NamespaceRegistry, Operation,
    OperationResult, ParamMode, Parameter, ParameterStyle, PathTemplate, Resource,
    ResourceMethod, ResourceParamKind, ResourceParameter, Wrapper,
};

use super::{ModelBuilder, ResourceSite};

const PARAM_KINDS: [(&str, ResourceParamKind); 6] = [
    (names::PATH_PARAM, ResourceParamKind::Path),
    (names::QUERY_PARAM, ResourceParamKind::Query),
    (names::HEADER_PARAM, ResourceParamKind::Header),
    (names::FORM_PARAM, ResourceParamKind::Form),
    (names::COOKIE_PARAM, ResourceParamKind::Cookie),
    (names::MATRIX_PARAM, ResourceParamKind::Matrix),
];

impl<'s> ModelBuilder<'s> {
    // =========================================================================
    // Registration
    // =========================================================================

    pub(super) fn register_registry(&mut self, name: &str) -> Result<()> {
        let source = self.source;
        let Some(decl) = source.declaration(name) else {
            self.report_missing(NodeRef::Type(name.to_string()), name);
            return Ok(());
        };
        for method in &decl.methods {
            if method.returns != TypeRef::Void {
                self.reach(&method.returns, &method.annotations, name, Some(&method.name))?;
            }
        }
        for ty in super::see_also(&decl.annotations) {
            self.reach(ty, &Annotations::new(), name, None)?;
        }
        tracing::debug!("registered registry {name}");
        Ok(())
    }

    pub(super) fn register_endpoint(&mut self, name: &str) -> Result<()> {
        if self.endpoints.iter().any(|d| d.name == name) {
            return Ok(());
        }
        let source = self.source;
        let Some(decl) = source.declaration(name) else {
            self.report_missing(NodeRef::EndpointInterface(name.to_string()), name);
            return Ok(());
        };
        self.endpoints.push(decl);

        for method in operations(decl) {
            for param in &method.params {
                self.reach(&param.ty, &param.annotations, name, Some(&method.name))?;
            }
            if method.returns != TypeRef::Void {
                self.reach(&method.returns, &method.annotations, name, Some(&method.name))?;
            }
            for thrown in &method.throws {
                self.reach_fault(thrown, name)?;
            }
        }
        tracing::debug!("registered endpoint interface {name}");
        Ok(())
    }

    /// Reaches the types a fault carries: its info type, or its fields.
    fn reach_fault(&mut self, thrown: &TypeRef, referrer: &str) -> Result<()> {
        let Some(name) = thrown.declared_name() else {
            return Ok(());
        };
        if !self.reached_faults.insert(name.to_string()) {
            return Ok(());
        }
        let source = self.source;
        let Some(decl) = source.declaration(name) else {
            return Ok(());
        };
        self.referrers
            .entry(name.to_string())
            .or_insert_with(|| referrer.to_string());

        if let Some(info) = fault_info(decl) {
            self.reach(info, &Annotations::new(), name, None)?;
        } else {
            let (fields, _) = self.fields_of(decl);
            for field in fields {
                self.reach(&field.ty, &field.annotations, name, Some(&field.name))?;
            }
        }
        Ok(())
    }

    /// Registers a resource class reached at `parent_path`, and every
    /// sub-resource its locators lead to.
    pub(super) fn register_resource(
        &mut self,
        name: &str,
        parent_path: &PathTemplate,
        parent: Option<&str>,
    ) -> Result<()> {
        if self.resource_sites.iter().any(|s| s.decl.name == name) {
            return Ok(());
        }
        let source = self.source;
        let Some(decl) = source.declaration(name) else {
            self.report_missing(NodeRef::Resource(name.to_string()), name);
            return Ok(());
        };
        let path = parent_path.join(&path_of(&decl.annotations));
        tracing::debug!("registered resource {name} at {path}");
        self.resource_sites.push(ResourceSite {
            decl,
            path: path.clone(),
            parent: parent.map(ToString::to_string),
        });

        for method in &decl.methods {
            let locator = is_locator(method);
            if !locator && !method.has(names::HTTP_METHOD) {
                continue;
            }
            for param in &method.params {
                self.reach(&param.ty, &param.annotations, name, Some(&method.name))?;
            }
            for thrown in &method.throws {
                self.reach_fault(thrown, name)?;
            }
            if locator {
                if let Some(target) = method.returns.declared_name() {
                    let child = path.join(&path_of(&method.annotations));
                    self.register_resource(target, &child, Some(name))?;
                }
            } else if method.returns != TypeRef::Void {
                self.reach(&method.returns, &method.annotations, name, Some(&method.name))?;
            }
        }
        Ok(())
    }

    // =========================================================================
    // Resolution
    // =========================================================================

    pub(super) fn resolve_endpoint(&mut self, decl: &'s Declaration) -> Result<EndpointInterface> {
        let service = decl.annotation(names::WEB_SERVICE);
        let name = service
            .and_then(|a| a.str("name"))
            .unwrap_or(decl.simple_name())
            .to_string();
        let namespace = NamespaceRegistry::resolve_namespace(
            service.and_then(|a| a.str("namespace")),
            decl.package(),
            self.source,
        );
        let style = style_of(decl.annotation(names::BINDING)).unwrap_or_default();

        let mut operations_out = Vec::new();
        for method in operations(decl) {
            operations_out.push(self.resolve_operation(decl, &namespace, style, method)?);
        }
        Ok(EndpointInterface {
            declaration: decl.name.clone(),
            name,
            namespace,
            operations: operations_out,
            doc: decl.doc.clone(),
        })
    }

    fn resolve_operation(
        &mut self,
        decl: &'s Declaration,
        namespace: &str,
        default_style: ParameterStyle,
        method: &'s MethodDecl,
    ) -> Result<Operation> {
        let config = self.config;
        let name = method
            .annotations
            .get(names::WEB_METHOD)
            .and_then(|a| a.str("operation-name"))
            .unwrap_or(&method.name)
            .to_string();
        let style = style_of(method.annotations.get(names::BINDING)).unwrap_or(default_style);
        let one_way = method.has(names::ONE_WAY);
        let part = |local: &str, header: bool| {
            if style == ParameterStyle::Wrapped && !header {
                QName::unqualified(local)
            } else {
                QName::new(namespace, local)
            }
        };

        let mut params = Vec::with_capacity(method.params.len());
        for param in &method.params {
            let web_param = param.annotations.get(names::WEB_PARAM);
            let param_name = web_param
                .and_then(|a| a.str("name"))
                .unwrap_or(&param.name)
                .to_string();
            let header = web_param.is_some_and(|a| a.flag("header"));
            let mode = match web_param.and_then(|a| a.str("mode")) {
                Some("out") => ParamMode::Out,
                Some("inout") => ParamMode::InOut,
                _ => ParamMode::In,
            };
            let shape = self.shape_of(&param.ty, &param.annotations, &decl.name, Some(&method.name))?;
            params.push(Parameter {
                element: part(&param_name, header),
                name: param_name,
                shape: self.resolve_shape(&shape),
                mode,
                header,
            });
        }

        let result = if method.returns == TypeRef::Void {
            None
        } else {
            let web_result = method.annotations.get(names::WEB_RESULT);
            let header = web_result.is_some_and(|a| a.flag("header"));
            let result_name = web_result.and_then(|a| a.str("name")).map_or_else(
                || {
                    if style == ParameterStyle::Bare {
                        format!("{name}{}", config.response_suffix)
                    } else {
                        "return".to_string()
                    }
                },
                ToString::to_string,
            );
            let shape = self.shape_of(
                &method.returns,
                &method.annotations,
                &decl.name,
                Some(&method.name),
            )?;
            Some(OperationResult {
                element: part(&result_name, header),
                name: result_name,
                shape: self.resolve_shape(&shape),
                header,
            })
        };

        let faults = self.fault_ids(&method.throws)?;

        let (request_wrapper, response_wrapper) = if style == ParameterStyle::Wrapped {
            let simple = capitalize(&name);
            let request = wrapper(
                method.annotations.get(names::REQUEST_WRAPPER),
                namespace,
                &name,
                config.synthetic_name(decl.package(), &simple, &config.request_suffix),
            );
            let response = (!one_way).then(|| {
                wrapper(
                    method.annotations.get(names::RESPONSE_WRAPPER),
                    namespace,
                    &format!("{name}{}", config.response_suffix),
                    config.synthetic_name(decl.package(), &simple, &config.response_suffix),
                )
            });
            (Some(request), response)
        } else {
            (None, None)
        };

        Ok(Operation {
            name,
            method: method.name.clone(),
            style,
            one_way,
            params,
            result,
            faults,
            request_wrapper,
            response_wrapper,
            doc: method.doc.clone(),
        })
    }

    fn fault_ids(&mut self, thrown: &[TypeRef]) -> Result<Vec<FaultId>> {
        let mut ids = Vec::new();
        for ty in thrown {
            if let Some(id) = self.fault_id(ty)? {
                if !ids.contains(&id) {
                    ids.push(id);
                }
            }
        }
        Ok(ids)
    }

    /// Returns the fault table entry for a thrown type, creating it on
    /// first use.
    ///
    /// Entries are keyed by bean name and declaration: the same declaration
    /// thrown by several operations shares one entry, while two
    /// declarations claiming one bean name get separate entries for
    /// validation to report.
    fn fault_id(&mut self, thrown: &TypeRef) -> Result<Option<FaultId>> {
        let Some(name) = thrown.declared_name() else {
            return Ok(None);
        };
        let source = self.source;
        let Some(decl) = source.declaration(name) else {
            self.report_missing(NodeRef::Fault(name.to_string()), name);
            return Ok(None);
        };
        let web_fault = decl.annotation(names::WEB_FAULT);
        let bean_name = web_fault
            .and_then(|a| a.str("fault-bean"))
            .map_or_else(
                || {
                    self.config.synthetic_name(
                        decl.package(),
                        decl.simple_name(),
                        &self.config.fault_bean_suffix,
                    )
                },
                ToString::to_string,
            );
        let key = (bean_name.clone(), decl.name.clone());
        if let Some(&id) = self.fault_index.get(&key) {
            return Ok(Some(id));
        }

        let namespace = NamespaceRegistry::resolve_namespace(
            web_fault.and_then(|a| a.str("namespace")),
            decl.package(),
            source,
        );
        let local = web_fault
            .and_then(|a| a.str("name"))
            .unwrap_or(decl.simple_name());
        let element = QName::new(namespace.clone(), local);

        let detail = if let Some(info) = fault_info(decl) {
            let shape = self.shape_of(info, &Annotations::new(), name, None)?;
            FaultDetail::Explicit(self.resolve_shape(&shape))
        } else {
            let (fields, _) = self.fields_of(decl);
            let mut members = Vec::with_capacity(fields.len());
            for field in fields {
                members.push(self.member(decl, &namespace, field)?);
            }
            FaultDetail::Implicit(members)
        };

        let id = u32::try_from(self.faults.len())
            .map(FaultId)
            .map_err(|_| Error::new(ErrorKind::Internal("fault table overflow".to_string())))?;
        tracing::debug!("registered fault {name} with bean {bean_name}");
        self.fault_index.insert(key, id);
        self.faults.push(Fault {
            id,
            declaration: decl.name.clone(),
            element,
            bean_name,
            detail,
            doc: decl.doc.clone(),
        });
        Ok(Some(id))
    }

    pub(super) fn resolve_resource(&mut self, site: &ResourceSite<'s>) -> Result<Resource> {
        let decl = site.decl;
        let consumes = media_types(&decl.annotations, names::CONSUMES);
        let produces = media_types(&decl.annotations, names::PRODUCES);

        let mut methods = Vec::new();
        for method in &decl.methods {
            let locator = is_locator(method);
            let http_method = method
                .annotations
                .get(names::HTTP_METHOD)
                .and_then(|a| a.str("value"))
                .map(str::to_uppercase);
            if http_method.is_none() && !locator {
                continue;
            }

            let subpath = method
                .annotations
                .get(names::PATH)
                .and_then(|a| a.str("value"))
                .map(PathTemplate::parse);
            let path = subpath
                .as_ref()
                .map_or_else(|| site.path.clone(), |sub| site.path.join(sub));

            let mut params = Vec::with_capacity(method.params.len());
            for param in &method.params {
                let (kind, param_name) = param_kind(param);
                let shape =
                    self.shape_of(&param.ty, &param.annotations, &decl.name, Some(&method.name))?;
                params.push(ResourceParameter {
                    name: param_name,
                    kind,
                    shape: self.resolve_shape(&shape),
                });
            }

            let response = if locator || method.returns == TypeRef::Void {
                None
            } else {
                let shape = self.shape_of(
                    &method.returns,
                    &method.annotations,
                    &decl.name,
                    Some(&method.name),
                )?;
                Some(self.resolve_shape(&shape))
            };
            let faults = self.fault_ids(&method.throws)?;

            let own_consumes = media_types(&method.annotations, names::CONSUMES);
            let own_produces = media_types(&method.annotations, names::PRODUCES);
            methods.push(ResourceMethod {
                name: method.name.clone(),
                http_method,
                subpath,
                path,
                params,
                response,
                faults,
                consumes: if own_consumes.is_empty() {
                    consumes.clone()
                } else {
                    own_consumes
                },
                produces: if own_produces.is_empty() {
                    produces.clone()
                } else {
                    own_produces
                },
                locates: if locator {
                    method.returns.declared_name().map(ToString::to_string)
                } else {
                    None
                },
                doc: method.doc.clone(),
            });
        }

        Ok(Resource {
            declaration: decl.name.clone(),
            path: site.path.clone(),
            parent: site.parent.clone(),
            consumes,
            produces,
            methods,
            doc: decl.doc.clone(),
        })
    }
}

// =============================================================================
// Free helpers
// =============================================================================

/// Methods that become operations.
fn operations(decl: &Declaration) -> impl Iterator<Item = &MethodDecl> {
    decl.methods.iter().filter(|m| {
        !m.annotations
            .get(names::WEB_METHOD)
            .is_some_and(|a| a.flag("exclude"))
    })
}

fn style_of(binding: Option<&Annotation>) -> Option<ParameterStyle> {
    match binding.and_then(|a| a.str("style")) {
        Some("bare") => Some(ParameterStyle::Bare),
        Some("wrapped") => Some(ParameterStyle::Wrapped),
        _ => None,
    }
}

fn wrapper(overrides: Option<&Annotation>, namespace: &str, local: &str, class_name: String) -> Wrapper {
    let namespace = overrides
        .and_then(|a| a.str("namespace"))
        .unwrap_or(namespace);
    let local = overrides.and_then(|a| a.str("local-name")).unwrap_or(local);
    Wrapper {
        element: QName::new(namespace, local),
        class_name: overrides
            .and_then(|a| a.str("class-name"))
            .map_or(class_name, ToString::to_string),
    }
}

fn fault_info(decl: &Declaration) -> Option<&TypeRef> {
    decl.annotation(names::WEB_FAULT)
        .and_then(|a| a.type_ref("info"))
}

fn path_of(annotations: &Annotations) -> PathTemplate {
    annotations
        .get(names::PATH)
        .and_then(|a| a.str("value"))
        .map(PathTemplate::parse)
        .unwrap_or_default()
}

/// A method with a path but no HTTP method, returning a class, locates a
/// sub-resource.
fn is_locator(method: &MethodDecl) -> bool {
    method.has(names::PATH)
        && !method.has(names::HTTP_METHOD)
        && method.returns.declared_name().is_some()
}

fn param_kind(param: &ParamDecl) -> (ResourceParamKind, String) {
    for (annotation, kind) in PARAM_KINDS {
        if let Some(a) = param.annotations.get(annotation) {
            let name = a.str("value").unwrap_or(&param.name).to_string();
            return (kind, name);
        }
    }
    (ResourceParamKind::Entity, param.name.clone())
}

fn media_types(annotations: &Annotations, name: &str) -> Vec<String> {
    annotations
        .get(name)
        .map(|a| a.strings("value").into_iter().map(ToString::to_string).collect())
        .unwrap_or_default()
}
