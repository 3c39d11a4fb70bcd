// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Field fragments shared by several VictoriaMetrics operator resources

use crate::schema::Field;

pub const PULL_POLICIES: &[&str] = &["Always", "Never", "IfNotPresent"];
pub const SCHEMES: &[&str] = &["http", "https"];

pub fn secret_key_selector(name: &str, target: &str, description: &str) -> Field {
    Field::object(
        name,
        target,
        vec![
            Field::string("key", "key")
                .required()
                .describe("The key of the secret to select from. Must be a valid secret key."),
            Field::string("name", "name").describe("Name of the referent."),
            Field::bool("optional", "optional")
                .describe("Specify whether the Secret or its key must be defined"),
        ],
    )
    .describe(description)
}

pub fn config_map_key_selector(name: &str, target: &str, description: &str) -> Field {
    Field::object(
        name,
        target,
        vec![
            Field::string("key", "key").required().describe("The key to select."),
            Field::string("name", "name").describe("Name of the referent."),
            Field::bool("optional", "optional")
                .describe("Specify whether the ConfigMap or its key must be defined"),
        ],
    )
    .describe(description)
}

/// Either a ConfigMap or a Secret key, as used for CA and client certificates
fn secret_or_config_map(name: &str, target: &str, description: &str) -> Field {
    Field::object(
        name,
        target,
        vec![
            config_map_key_selector("config_map", "configMap", "ConfigMap containing data to use for the targets."),
            secret_key_selector("secret", "secret", "Secret containing data to use for the targets."),
        ],
    )
    .describe(description)
}

pub fn tls_config() -> Field {
    Field::object(
        "tls_config",
        "tlsConfig",
        vec![
            secret_or_config_map("ca", "ca", "Struct containing the CA cert to use for the targets."),
            Field::string("ca_file", "caFile")
                .describe("Path to the CA cert in the container to use for the targets."),
            secret_or_config_map("cert", "cert", "Struct containing the client cert file for the targets."),
            Field::string("cert_file", "certFile")
                .describe("Path to the client cert file in the container for the targets."),
            Field::bool("insecure_skip_verify", "insecureSkipVerify")
                .describe("Disable target certificate validation."),
            Field::string("key_file", "keyFile")
                .describe("Path to the client key file in the container for the targets."),
            secret_key_selector("key_secret", "keySecret", "Secret containing the client key file for the targets."),
            Field::string("server_name", "serverName")
                .describe("Used to verify the hostname for the targets."),
        ],
    )
    .describe("TLSConfig configuration to use when scraping the endpoint")
}

pub fn basic_auth() -> Field {
    Field::object(
        "basic_auth",
        "basicAuth",
        vec![
            secret_key_selector(
                "password",
                "password",
                "Password defines reference for secret with password value. The secret needs to be in the same namespace as scrape object.",
            ),
            Field::string("password_file", "password_file")
                .describe("PasswordFile defines path to password file at disk. Must be mounted into the operator container."),
            secret_key_selector(
                "username",
                "username",
                "Username defines reference for secret with username value. The secret needs to be in the same namespace as scrape object.",
            ),
        ],
    )
    .describe("BasicAuth allow an endpoint to authenticate over basic authentication")
}

pub fn oauth2() -> Field {
    Field::object(
        "oauth2",
        "oauth2",
        vec![
            secret_or_config_map("client_id", "client_id", "The secret or configmap containing the OAuth2 client id")
                .required(),
            secret_key_selector("client_secret", "client_secret", "The secret containing the OAuth2 client secret"),
            Field::string("client_secret_file", "client_secret_file")
                .describe("ClientSecretFile defines path for client secret file."),
            Field::map_of_string("endpoint_params", "endpoint_params")
                .describe("Parameters to append to the token URL"),
            Field::string("proxy_url", "proxy_url")
                .describe("The proxy URL for token_url connection ( available from v0.55.0). Is only supported by Scrape objects family"),
            Field::list_of_string("scopes", "scopes").describe("OAuth2 scopes used for the token request"),
            Field::string("token_url", "token_url")
                .required()
                .min_length(1)
                .describe("The URL to fetch the token from"),
        ],
    )
    .describe("OAuth2 defines auth configuration")
}

pub fn authorization() -> Field {
    Field::object(
        "authorization",
        "authorization",
        vec![
            secret_key_selector("credentials", "credentials", "Reference to the secret with value for authorization"),
            Field::string("credentials_file", "credentialsFile").describe("File with value for authorization"),
            Field::string("type", "type").describe("Type of authorization, default to bearer"),
        ],
    )
    .describe("Authorization with http header Authorization")
}

/// List of relabeling rules; the VictoriaMetrics CRD accepts both naming styles
pub fn relabel_configs(name: &str, target: &str, description: &str) -> Field {
    Field::list_of_object(
        name,
        target,
        vec![
            Field::string("action", "action")
                .describe("Action to perform based on regex matching. Default is 'replace'"),
            Field::dynamic("if", "if")
                .describe("If represents metricsQL match expression (or list of expressions)"),
            Field::map_of_string("labels", "labels")
                .describe("Labels is used together with Match for action: graphite"),
            Field::string("match", "match")
                .describe("Match is used together with Labels for action: graphite"),
            Field::integer("modulus", "modulus").describe("Modulus to take of the hash of the source label values."),
            Field::dynamic("regex", "regex")
                .describe("Regular expression against which the extracted value is matched. Default is '(.*)'"),
            Field::string("replacement", "replacement")
                .describe("Replacement value against which a regex replace is performed if the regular expression matches. Regex capture groups are available. Default is '$1'"),
            Field::string("separator", "separator")
                .describe("Separator placed between concatenated source label values. default is ';'."),
            Field::list_of_string("source_labels", "sourceLabels")
                .describe("The source labels select values from existing labels. Their content is concatenated using the configured separator and matched against the configured regular expression for the replace, keep, and drop actions."),
            Field::string("target_label", "targetLabel")
                .describe("Label to which the resulting value is written in a replace action. It is mandatory for replace actions. Regex capture groups are available."),
        ],
    )
    .describe(description)
}

pub fn vm_scrape_params() -> Field {
    Field::object(
        "vm_scrape_params",
        "vm_scrape_params",
        vec![
            Field::bool("disable_compression", "disable_compression")
                .describe("DisableCompression"),
            Field::bool("disable_keep_alive", "disable_keep_alive")
                .describe("disable_keepalive allows disabling HTTP keep-alive when scraping targets."),
            Field::list_of_string("headers", "headers")
                .describe("Headers allows sending custom headers to scrape targets must be in of semicolon separated header with it's value eg: headerName: headerValue"),
            Field::object(
                "proxy_client_config",
                "proxy_client_config",
                vec![
                    basic_auth(),
                    Field::string("bearer_token", "bearer_token"),
                    Field::string("bearer_token_file", "bearer_token_file"),
                    tls_config(),
                ],
            )
            .describe("ProxyClientConfig configures proxy auth settings for scraping See feature description https://docs.victoriametrics.com/vmagent#scraping-targets-via-a-proxy"),
            Field::string("scrape_align_interval", "scrape_align_interval"),
            Field::string("scrape_offset", "scrape_offset"),
            Field::bool("stream_parse", "stream_parse"),
        ],
    )
    .describe("VMScrapeParams defines VictoriaMetrics specific scrape parameters")
}

/// Connection and scrape settings shared by VMProbe and static scrape endpoints
pub fn endpoint_auth_fields() -> Vec<Field> {
    vec![
        authorization(),
        basic_auth(),
        Field::string("bearer_token_file", "bearerTokenFile")
            .describe("File to read bearer token for scraping targets."),
        secret_key_selector(
            "bearer_token_secret",
            "bearerTokenSecret",
            "Secret to mount to read bearer token for scraping targets. The secret needs to be in the same namespace as the scrape object and accessible by the victoria-metrics operator.",
        ),
        Field::bool("follow_redirects", "follow_redirects")
            .describe("FollowRedirects controls redirects for scraping."),
        Field::bool("honor_labels", "honorLabels")
            .describe("HonorLabels chooses the metric's labels on collisions with target labels."),
        Field::bool("honor_timestamps", "honorTimestamps")
            .describe("HonorTimestamps controls whether vmagent respects the timestamps present in scraped data."),
        Field::string("interval", "interval").describe("Interval at which metrics should be scraped"),
        Field::string("max_scrape_size", "max_scrape_size")
            .describe("MaxScrapeSize defines a maximum size of scraped data for a job"),
        relabel_configs(
            "metric_relabel_configs",
            "metricRelabelConfigs",
            "MetricRelabelConfigs to apply to samples after scrapping.",
        ),
        oauth2(),
        Field::map_of_list_of_string("params", "params").describe("Optional HTTP URL parameters"),
        Field::string("path", "path").describe("HTTP path to scrape for metrics."),
        Field::dynamic("port", "port").describe("Port name or number to scrape"),
        Field::string("proxy_url", "proxyURL")
            .describe("ProxyURL eg http://proxyserver:2195 Directs scrapes to proxy through this endpoint."),
        Field::integer("sample_limit", "sampleLimit")
            .range(Some(0), None)
            .describe("SampleLimit defines per-scrape limit on number of scraped samples that will be accepted."),
        Field::string("scheme", "scheme")
            .one_of(SCHEMES)
            .describe("HTTP scheme to use for scraping."),
        Field::string("scrape_interval", "scrape_interval")
            .describe("ScrapeInterval is the same as Interval and has priority over it. one of scrape_interval or interval can be used"),
        Field::string("scrape_timeout", "scrapeTimeout").describe("Timeout after which the scrape is ended"),
        Field::integer("series_limit", "seriesLimit")
            .range(Some(0), None)
            .describe("SeriesLimit defines per-scrape limit on number of unique time series a single target can expose during all the scrapes on the time window of 24h."),
        tls_config(),
        vm_scrape_params(),
    ]
}

pub fn image() -> Field {
    Field::object(
        "image",
        "image",
        vec![
            Field::string("pull_policy", "pullPolicy")
                .one_of(PULL_POLICIES)
                .describe("PullPolicy describes how to pull docker image"),
            Field::string("repository", "repository").describe("Repository contains name of docker image + it's repository if needed"),
            Field::string("tag", "tag").describe("Tag contains desired docker image version"),
        ],
    )
    .describe("Image - docker image settings if no specified operator uses default version from operator config")
}

pub fn label_selector(name: &str, target: &str, description: &str) -> Field {
    Field::object(
        name,
        target,
        vec![
            Field::list_of_object(
                "match_expressions",
                "matchExpressions",
                vec![
                    Field::string("key", "key")
                        .required()
                        .describe("key is the label key that the selector applies to."),
                    Field::string("operator", "operator")
                        .required()
                        .one_of(&["In", "NotIn", "Exists", "DoesNotExist"])
                        .describe("operator represents a key's relationship to a set of values."),
                    Field::list_of_string("values", "values")
                        .describe("values is an array of string values."),
                ],
            )
            .describe("matchExpressions is a list of label selector requirements. The requirements are ANDed."),
            Field::map_of_string("match_labels", "matchLabels")
                .describe("matchLabels is a map of {key,value} pairs."),
        ],
    )
    .describe(description)
}

pub fn namespace_selector() -> Field {
    Field::object(
        "namespace_selector",
        "namespaceSelector",
        vec![
            Field::bool("any", "any")
                .describe("Boolean describing whether all namespaces are selected in contrast to a list restricting them."),
            Field::list_of_string("match_names", "matchNames").describe("List of namespace names."),
        ],
    )
    .describe("Select Ingress objects by namespace.")
}

/// Labels and annotations propagated to pods or owned objects
pub fn embedded_metadata(name: &str, target: &str, description: &str) -> Field {
    Field::object(
        name,
        target,
        vec![
            Field::map_of_string("annotations", "annotations")
                .describe("Annotations is an unstructured key value map stored with a resource that may be set by external tools to store and retrieve arbitrary metadata."),
            Field::map_of_string("labels", "labels")
                .describe("Labels Map of string keys and values that can be used to organize and categorize (scope and select) objects."),
            Field::string("name", "name").describe("Name must be unique within a namespace."),
        ],
    )
    .describe(description)
}

pub fn tolerations() -> Field {
    Field::list_of_object(
        "tolerations",
        "tolerations",
        vec![
            Field::string("effect", "effect")
                .one_of(&["NoSchedule", "PreferNoSchedule", "NoExecute"])
                .describe("Effect indicates the taint effect to match. Empty means match all taint effects."),
            Field::string("key", "key")
                .describe("Key is the taint key that the toleration applies to. Empty means match all taint keys."),
            Field::string("operator", "operator")
                .one_of(&["Exists", "Equal"])
                .describe("Operator represents a key's relationship to the value. Defaults to Equal."),
            Field::integer("toleration_seconds", "tolerationSeconds")
                .describe("TolerationSeconds represents the period of time the toleration (which must be of effect NoExecute) tolerates the taint."),
            Field::string("value", "value").describe("Value is the taint value the toleration matches to."),
        ],
    )
    .describe("Tolerations If specified, the pod's tolerations.")
}

/// Source of an environment variable value
pub fn env_var_source() -> Field {
    Field::object(
        "value_from",
        "valueFrom",
        vec![
            config_map_key_selector("config_map_key_ref", "configMapKeyRef", "Selects a key of a ConfigMap."),
            Field::object(
                "field_ref",
                "fieldRef",
                vec![
                    Field::string("api_version", "apiVersion")
                        .describe("Version of the schema the FieldPath is written in terms of, defaults to v1."),
                    Field::string("field_path", "fieldPath")
                        .required()
                        .describe("Path of the field to select in the specified API version."),
                ],
            )
            .describe("Selects a field of the pod."),
            Field::object(
                "resource_field_ref",
                "resourceFieldRef",
                vec![
                    Field::string("container_name", "containerName")
                        .describe("Container name: required for volumes, optional for env vars"),
                    Field::dynamic("divisor", "divisor")
                        .describe("Specifies the output format of the exposed resources, defaults to 1"),
                    Field::string("resource", "resource").required().describe("Required: resource to select"),
                ],
            )
            .describe("Selects a resource of the container: only resources limits and requests are currently supported."),
            secret_key_selector("secret_key_ref", "secretKeyRef", "Selects a key of a secret in the pod's namespace"),
        ],
    )
    .describe("Source for the environment variable's value. Cannot be used if value is not empty.")
}

pub fn readiness_gates() -> Field {
    Field::list_of_object(
        "readiness_gates",
        "readinessGates",
        vec![Field::string("condition_type", "conditionType")
            .required()
            .describe("ConditionType refers to a condition in the pod's condition list with matching type.")],
    )
    .describe("ReadinessGates defines pod readiness gates")
}

pub fn host_aliases() -> Field {
    Field::list_of_object(
        "host_aliases",
        "hostAliases",
        vec![
            Field::list_of_string("hostnames", "hostnames").describe("Hostnames for the above IP address."),
            Field::string("ip", "ip").required().describe("IP address of the host file entry."),
        ],
    )
    .describe("HostAliases provides mapping for ip and hostname, that would be propagated to pod, cannot be used with HostNetwork.")
}

pub fn dns_config() -> Field {
    Field::object(
        "dns_config",
        "dnsConfig",
        vec![
            Field::list_of_string("nameservers", "nameservers")
                .describe("A list of DNS name server IP addresses."),
            Field::list_of_object(
                "options",
                "options",
                vec![
                    Field::string("name", "name").describe("Name of the resolver option."),
                    Field::string("value", "value"),
                ],
            )
            .describe("A list of DNS resolver options."),
            Field::list_of_string("searches", "searches")
                .describe("A list of DNS search domains for host-name lookup."),
        ],
    )
    .describe("Specifies the DNS parameters of a pod.")
}

/// Resource limits and requests; quantities are int-or-string keyed by resource name
pub fn resource_requirements(description: &str) -> Field {
    Field::object(
        "resources",
        "resources",
        vec![
            Field::list_of_object(
                "claims",
                "claims",
                vec![
                    Field::string("name", "name")
                        .required()
                        .describe("Name must match the name of one entry in pod.spec.resourceClaims of the Pod where this field is used."),
                    Field::string("request", "request"),
                ],
            )
            .describe("Claims lists the names of resources, defined in spec.resourceClaims, that are used by this container."),
            Field::dynamic("limits", "limits").describe("Limits describes the maximum amount of compute resources allowed."),
            Field::dynamic("requests", "requests")
                .describe("Requests describes the minimum amount of compute resources required."),
        ],
    )
    .describe(description)
}

/// Reference to an object in the given API group, as used by PVC data sources
pub fn typed_object_reference(name: &str, target: &str, description: &str) -> Field {
    Field::object(
        name,
        target,
        vec![
            Field::string("api_group", "apiGroup")
                .describe("APIGroup is the group for the resource being referenced."),
            Field::string("kind", "kind").required().describe("Kind is the type of resource being referenced"),
            Field::string("name", "name").required().describe("Name is the name of resource being referenced"),
        ],
    )
    .describe(description)
}
