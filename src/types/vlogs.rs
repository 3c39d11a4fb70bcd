// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::{kinds, victoriametrics};
use crate::schema::{Field, ManifestSchema};
use crate::types::common::{
    dns_config, embedded_metadata, env_var_source, host_aliases, image, label_selector, readiness_gates,
    resource_requirements, tolerations, typed_object_reference,
};

pub const LOG_LEVELS: &[&str] = &["INFO", "WARN", "ERROR", "FATAL", "PANIC"];
pub const LOG_FORMATS: &[&str] = &["default", "json"];

/// VLogs: a single-node VictoriaLogs deployment
pub fn schema() -> ManifestSchema {
    ManifestSchema::new(victoriametrics::GROUP, victoriametrics::VERSION, kinds::VLOGS, "vlogs")
        .describe("VLogsSpec defines the desired state of VLogs")
        .with_spec(spec_fields(), true)
}

fn storage() -> Field {
    Field::object(
        "storage",
        "storage",
        vec![
            Field::list_of_string("access_modes", "accessModes")
                .describe("accessModes contains the desired access modes the volume should have."),
            typed_object_reference(
                "data_source",
                "dataSource",
                "dataSource field can be used to specify an existing VolumeSnapshot or PVC to populate the volume.",
            ),
            Field::object(
                "resources",
                "resources",
                vec![
                    Field::dynamic("limits", "limits")
                        .describe("Limits describes the maximum amount of compute resources allowed."),
                    Field::dynamic("requests", "requests")
                        .describe("Requests describes the minimum amount of compute resources required."),
                ],
            )
            .describe("resources represents the minimum resources the volume should have."),
            label_selector("selector", "selector", "selector is a label query over volumes to consider for binding."),
            Field::string("storage_class_name", "storageClassName")
                .describe("storageClassName is the name of the StorageClass required by the claim."),
            Field::string("volume_mode", "volumeMode")
                .one_of(&["Filesystem", "Block"])
                .describe("volumeMode defines what type of volume is required by the claim."),
            Field::string("volume_name", "volumeName")
                .describe("volumeName is the binding reference to the PersistentVolume backing this claim."),
        ],
    )
    .describe("Storage is the definition of how storage will be used by the VLogs by default it`s empty dir")
}

fn service_spec() -> Field {
    Field::object(
        "service_spec",
        "serviceSpec",
        vec![
            embedded_metadata("metadata", "metadata", "EmbeddedObjectMetadata contains metadata relevant to an EmbeddedResource."),
            Field::dynamic("spec", "spec").required().describe("ServiceSpec describes the attributes that a user creates on a service."),
            Field::bool("use_as_default", "useAsDefault")
                .describe("UseAsDefault applies changes from given service definition to the main object Service"),
        ],
    )
    .describe("ServiceSpec that will be added to vlogs service spec")
}

fn spec_fields() -> Vec<Field> {
    vec![
        Field::dynamic("affinity", "affinity").describe("Affinity If specified, the pod's scheduling constraints."),
        Field::list_of_string("config_maps", "configMaps")
            .describe("ConfigMaps is a list of ConfigMaps in the same namespace as the Application object, which shall be mounted into the Application container at /etc/vm/configs/CONFIGMAP_NAME folder"),
        Field::dynamic("containers", "containers")
            .describe("Containers property allows to inject additions sidecars or to patch existing containers."),
        Field::bool("disable_automount_service_account_token", "disableAutomountServiceAccountToken")
            .describe("DisableAutomountServiceAccountToken whether to disable serviceAccount auto mount by Kubernetes (available from v0.54.0)."),
        Field::bool("disable_self_service_scrape", "disableSelfServiceScrape")
            .describe("DisableSelfServiceScrape controls creation of VMServiceScrape by operator for the application."),
        dns_config(),
        Field::string("dns_policy", "dnsPolicy").describe("DNSPolicy sets DNS policy for the pod"),
        Field::map_of_string("extra_args", "extraArgs")
            .describe("ExtraArgs that will be passed to the application container for example remoteWrite.tmpDataPath: /tmp"),
        Field::list_of_object(
            "extra_envs",
            "extraEnvs",
            vec![
                Field::string("name", "name").required().describe("Name of the environment variable."),
                Field::string("value", "value").describe("Variable references $(VAR_NAME) are expanded using the previously defined environment variables in the container."),
                env_var_source(),
            ],
        )
        .describe("ExtraEnvs that will be passed to the application container"),
        Field::string("future_retention", "futureRetention")
            .describe("FutureRetention for the stored logs Log entries with timestamps bigger than now+futureRetention are rejected during data ingestion; see https://docs.victoriametrics.com/victorialogs/#retention"),
        host_aliases(),
        Field::bool("host_network", "hostNetwork").describe("HostNetwork controls whether the pod may use the node network namespace"),
        image(),
        Field::list_of_object(
            "image_pull_secrets",
            "imagePullSecrets",
            vec![Field::string("name", "name").describe("Name of the referent.")],
        )
        .describe("ImagePullSecrets An optional list of references to secrets in the same namespace to use for pulling images from registries"),
        Field::dynamic("init_containers", "initContainers")
            .describe("InitContainers allows adding initContainers to the pod definition."),
        Field::dynamic("liveness_probe", "livenessProbe")
            .describe("LivenessProbe that will be added CRD pod"),
        Field::string("log_format", "logFormat")
            .one_of(LOG_FORMATS)
            .describe("LogFormat for VLogs to be configured with."),
        Field::list_of_string("log_ingested_rows", "logIngestedRows")
            .describe("Whether to log all the ingested log entries; this can be useful for debugging of data ingestion; see https://docs.victoriametrics.com/victorialogs/data-ingestion/"),
        Field::string("log_level", "logLevel")
            .one_of(LOG_LEVELS)
            .describe("LogLevel for VictoriaLogs to be configured with."),
        Field::bool("log_new_streams", "logNewStreams")
            .describe("LogNewStreams Whether to log creation of new streams; this can be useful for debugging of high cardinality issues with log streams; see https://docs.victoriametrics.com/victorialogs/keyconcepts/#stream-fields"),
        embedded_metadata(
            "managed_metadata",
            "managedMetadata",
            "ManagedMetadata defines metadata that will be added to the all objects created by operator for the given CustomResource",
        ),
        Field::integer("min_ready_seconds", "minReadySeconds")
            .range(Some(0), None)
            .describe("MinReadySeconds defines a minimum number of seconds to wait before starting update next pod if previous in healthy state Has no effect for VLogs and VMSingle"),
        Field::map_of_string("node_selector", "nodeSelector")
            .describe("NodeSelector Define which Nodes the Pods are scheduled on."),
        Field::bool("paused", "paused")
            .describe("Paused If set to true all actions on the underlying managed objects are not going to be performed, except for delete actions."),
        embedded_metadata("pod_metadata", "podMetadata", "PodMetadata configures Labels and Annotations which are propagated to the VLogs pods."),
        Field::string("port", "port").describe("Port listen address"),
        Field::string("priority_class_name", "priorityClassName").describe("PriorityClassName class assigned to the Pods"),
        readiness_gates(),
        Field::dynamic("readiness_probe", "readinessProbe")
            .describe("ReadinessProbe that will be added CRD pod"),
        Field::bool("remove_pvc_after_delete", "removePvcAfterDelete")
            .describe("RemovePvcAfterDelete - if true, controller adds ownership to pvc and after VLogs object deletion - pvc will be garbage collected by controller manager"),
        Field::integer("replica_count", "replicaCount")
            .range(Some(0), None)
            .describe("ReplicaCount is the expected size of the Application."),
        resource_requirements(
            "Resources container resource request and limits, https://kubernetes.io/docs/concepts/configuration/manage-resources-containers/",
        ),
        Field::string("retention_period", "retentionPeriod")
            .required()
            .describe("RetentionPeriod for the stored logs"),
        Field::integer("revision_history_limit_count", "revisionHistoryLimitCount")
            .describe("The number of old ReplicaSets to retain to allow rollback in deployment or maximum number of revisions that will be maintained in the Deployment revision history."),
        Field::string("runtime_class_name", "runtimeClassName")
            .describe("RuntimeClassName - defines runtime class for kubernetes pod."),
        Field::string("scheduler_name", "schedulerName").describe("SchedulerName - defines kubernetes scheduler name"),
        Field::list_of_string("secrets", "secrets")
            .describe("Secrets is a list of Secrets in the same namespace as the Application object, which shall be mounted into the Application container at /etc/vm/secrets/SECRET_NAME folder"),
        Field::dynamic("security_context", "securityContext")
            .describe("SecurityContext holds pod-level security attributes and common container settings."),
        Field::string("service_account_name", "serviceAccountName")
            .describe("ServiceAccountName is the name of the ServiceAccount to use to run the pods"),
        Field::dynamic("service_scrape_spec", "serviceScrapeSpec")
            .describe("ServiceScrapeSpec that will be added to vlogs VMServiceScrape spec"),
        service_spec(),
        Field::dynamic("startup_probe", "startupProbe").describe("StartupProbe that will be added to CRD pod"),
        storage(),
        Field::string("storage_data_path", "storageDataPath")
            .describe("StorageDataPath disables spec.storage option and overrides arg for victoria-logs binary --storageDataPath, its users responsibility to mount proper device into given path."),
        embedded_metadata("storage_metadata", "storageMetadata", "StorageMeta defines annotations and labels attached to PVC for given vlogs CR"),
        Field::integer("termination_grace_period_seconds", "terminationGracePeriodSeconds")
            .describe("TerminationGracePeriodSeconds period for container graceful termination"),
        tolerations(),
        Field::dynamic("topology_spread_constraints", "topologySpreadConstraints")
            .describe("TopologySpreadConstraints embedded kubernetes pod configuration option, controls how pods are spread across your cluster among failure-domains such as regions, zones, nodes, and other user-defined topology domains"),
        Field::bool("use_default_resources", "useDefaultResources")
            .describe("UseDefaultResources controls resource settings By default, operator sets built-in resource requirements"),
        Field::bool("use_strict_security", "useStrictSecurity")
            .describe("UseStrictSecurity enables strict security mode for component it restricts disk writes access uses non-root user out of the box drops not needed security permissions"),
        Field::dynamic("volume_mounts", "volumeMounts")
            .describe("VolumeMounts allows configuration of additional VolumeMounts on the output Deployment/StatefulSet definition."),
        Field::dynamic("volumes", "volumes")
            .describe("Volumes allows configuration of additional volumes on the output Deployment/StatefulSet definition."),
    ]
}
